use crate::core::BodyHandle;
use crate::collision::{Grid, Quadtree};
use crate::error::SimError;
use crate::math::BoundingBox;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// What a broad-phase index stores for a body: its handle and a snapshot of its box.
///
/// The index never owns bodies. A proxy is only valid until the next rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proxy {
    /// The body this entry refers to
    pub handle: BodyHandle,

    /// The body's bounding box when the entry was inserted
    pub bounds: BoundingBox,
}

impl Proxy {
    #[inline]
    pub fn new(handle: BodyHandle, bounds: BoundingBox) -> Self {
        Self { handle, bounds }
    }
}

/// Trait for broad-phase spatial indices
pub trait BroadPhase {
    /// Removes every entry, keeping the configuration
    fn clear(&mut self);

    /// Inserts an entry. Returns false if its box lies entirely outside the
    /// index bounds, in which case nothing is stored.
    fn insert(&mut self, proxy: Proxy) -> bool;

    /// Returns the entries whose boxes overlap `range`
    fn query(&self, range: &BoundingBox) -> Vec<Proxy>;

    /// Number of entries accepted since the last clear
    fn len(&self) -> usize;

    /// Returns whether the index holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The area the index covers
    fn bounds(&self) -> BoundingBox;

    /// Returns the name of the index
    fn name(&self) -> &str;

    /// Clears the index and inserts every proxy. Returns the handles that were rejected.
    fn rebuild(&mut self, proxies: &[Proxy]) -> Vec<BodyHandle> {
        self.clear();
        proxies
            .iter()
            .filter(|proxy| !self.insert(**proxy))
            .map(|proxy| proxy.handle)
            .collect()
    }
}

/// Which broad-phase index a world uses
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BroadPhaseConfig {
    /// Uniform grid of square cells
    Grid {
        cell_size: f32,
    },

    /// Region quadtree
    Quadtree {
        capacity: usize,
        max_level: u32,
    },
}

impl Default for BroadPhaseConfig {
    fn default() -> Self {
        Self::Grid { cell_size: 64.0 }
    }
}

impl BroadPhaseConfig {
    /// Quadtree with the usual capacity of 4 and depth limit of 5
    pub fn default_quadtree() -> Self {
        Self::Quadtree {
            capacity: Quadtree::DEFAULT_CAPACITY,
            max_level: Quadtree::DEFAULT_MAX_LEVEL,
        }
    }

    /// Checks the parameters without allocating an index
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Grid { cell_size } => {
                if !(cell_size > 0.0) || !cell_size.is_finite() {
                    return Err(SimError::InvalidConfig(format!(
                        "grid cell size must be positive and finite, got {}",
                        cell_size
                    )));
                }
            }
            Self::Quadtree { capacity, .. } => {
                if capacity == 0 {
                    return Err(SimError::InvalidConfig(
                        "quadtree capacity must be at least 1".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Creates the configured index over `bounds`
    pub fn build(&self, bounds: BoundingBox) -> Result<Box<dyn BroadPhase>> {
        Ok(match *self {
            Self::Grid { cell_size } => Box::new(Grid::with_bounds(bounds, cell_size)?),
            Self::Quadtree { capacity, max_level } => {
                Box::new(Quadtree::new(bounds, capacity, max_level)?)
            }
        })
    }
}
