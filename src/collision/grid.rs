use std::collections::{HashMap, HashSet};

use crate::collision::{BroadPhase, Proxy};
use crate::error::SimError;
use crate::math::BoundingBox;
use crate::Result;

/// Uniform grid broad-phase.
///
/// Every entry is listed in each cell its box touches, so a box spanning four
/// cells is stored four times. Queries de-duplicate. There is no removal;
/// the grid is cleared and refilled every step.
#[derive(Debug, Clone)]
pub struct Grid {
    /// The area the grid accepts entries from
    bounds: BoundingBox,

    /// Side length of a square cell
    cell_size: f32,

    /// Cell coordinate to indices into `proxies`
    cells: HashMap<(i32, i32), Vec<usize>>,

    /// Accepted entries, in insertion order
    proxies: Vec<Proxy>,

    /// First and last cell coordinates covering `bounds`, inclusive
    cell_min: (i32, i32),
    cell_max: (i32, i32),
}

impl Grid {
    /// Creates a grid covering `(0, 0, width, height)`
    pub fn new(width: f32, height: f32, cell_size: f32) -> Result<Self> {
        Self::with_bounds(BoundingBox::new(0.0, 0.0, width, height), cell_size)
    }

    /// Creates a grid covering an arbitrary region
    pub fn with_bounds(bounds: BoundingBox, cell_size: f32) -> Result<Self> {
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "grid cell size must be positive and finite, got {}",
                cell_size
            )));
        }
        if bounds.is_degenerate() {
            return Err(SimError::InvalidConfig(format!(
                "grid bounds must have a positive area, got {:?}",
                bounds
            )));
        }

        let cell_min = (
            (bounds.left() / cell_size).floor() as i32,
            (bounds.top() / cell_size).floor() as i32,
        );
        let cell_max = (
            ((bounds.right() / cell_size).ceil() as i32 - 1).max(cell_min.0),
            ((bounds.bottom() / cell_size).ceil() as i32 - 1).max(cell_min.1),
        );

        Ok(Self {
            bounds,
            cell_size,
            cells: HashMap::new(),
            proxies: Vec::new(),
            cell_min,
            cell_max,
        })
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of columns and rows covering the bounds
    pub fn dimensions(&self) -> (usize, usize) {
        let cols = (self.bounds.width / self.cell_size).ceil() as usize;
        let rows = (self.bounds.height / self.cell_size).ceil() as usize;
        (cols, rows)
    }

    /// Number of cells that currently hold at least one entry
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Gets the cell coordinate for a point
    #[inline]
    fn cell_index(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    /// Gets the inclusive range of cell coordinates a box spans, clamped to
    /// the cells covering the grid bounds. Parts of a box outside the bounds
    /// map onto the edge cells.
    fn cell_range(&self, bounds: &BoundingBox) -> ((i32, i32), (i32, i32)) {
        let clamp = |(col, row): (i32, i32)| {
            (
                col.clamp(self.cell_min.0, self.cell_max.0),
                row.clamp(self.cell_min.1, self.cell_max.1),
            )
        };
        let min_cell = clamp(self.cell_index(bounds.left(), bounds.top()));
        let max_cell = clamp(self.cell_index(bounds.right(), bounds.bottom()));
        (min_cell, max_cell)
    }

    /// Every cell coordinate the box is bucketed under, column-major
    pub fn cell_coords(&self, bounds: &BoundingBox) -> Vec<(i32, i32)> {
        let (min_cell, max_cell) = self.cell_range(bounds);
        let mut coords = Vec::new();
        for col in min_cell.0..=max_cell.0 {
            for row in min_cell.1..=max_cell.1 {
                coords.push((col, row));
            }
        }
        coords
    }

    /// Number of entries stored in the cell at `(col, row)`
    pub fn bucket_len(&self, col: i32, row: i32) -> usize {
        self.cells.get(&(col, row)).map_or(0, Vec::len)
    }

    /// Calls `visit` with every bucket the range spans. Large ranges walk the
    /// occupied cells instead of the full coordinate rectangle.
    fn for_each_bucket<F: FnMut(&[usize])>(&self, range: &BoundingBox, mut visit: F) {
        let (min_cell, max_cell) = self.cell_range(range);
        let span = (max_cell.0 as i64 - min_cell.0 as i64 + 1)
            .saturating_mul(max_cell.1 as i64 - min_cell.1 as i64 + 1);

        if span > self.cells.len() as i64 {
            for (&(col, row), bucket) in &self.cells {
                if (min_cell.0..=max_cell.0).contains(&col) && (min_cell.1..=max_cell.1).contains(&row) {
                    visit(bucket);
                }
            }
        } else {
            for col in min_cell.0..=max_cell.0 {
                for row in min_cell.1..=max_cell.1 {
                    if let Some(bucket) = self.cells.get(&(col, row)) {
                        visit(bucket);
                    }
                }
            }
        }
    }
}

impl BroadPhase for Grid {
    fn clear(&mut self) {
        self.cells.clear();
        self.proxies.clear();
    }

    fn insert(&mut self, proxy: Proxy) -> bool {
        if !self.bounds.overlaps(&proxy.bounds) {
            return false;
        }

        let index = self.proxies.len();
        self.proxies.push(proxy);

        for coord in self.cell_coords(&proxy.bounds) {
            self.cells.entry(coord).or_default().push(index);
        }
        true
    }

    fn query(&self, range: &BoundingBox) -> Vec<Proxy> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        self.for_each_bucket(range, |bucket| {
            for &index in bucket {
                if seen.insert(index) {
                    let proxy = self.proxies[index];
                    if range.overlaps(&proxy.bounds) {
                        found.push(proxy);
                    }
                }
            }
        });

        // Bucket iteration order is hash order; sort so callers see a stable sequence
        found.sort_by_key(|proxy| proxy.handle);
        found
    }

    fn len(&self) -> usize {
        self.proxies.len()
    }

    fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    fn name(&self) -> &str {
        "Grid"
    }
}
