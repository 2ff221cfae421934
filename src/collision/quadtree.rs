use crate::collision::{BroadPhase, Proxy};
use crate::error::SimError;
use crate::math::BoundingBox;
use crate::Result;

/// A single region of a [`Quadtree`]
#[derive(Debug, Clone)]
pub struct QuadNode {
    /// The region this node covers
    boundary: BoundingBox,

    /// Depth of this node, the root is level 0
    level: u32,

    /// Entries stored directly at this node
    objects: Vec<Proxy>,

    /// NW, NE, SW, SE quadrants once the node has divided
    children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    fn new(boundary: BoundingBox, level: u32) -> Self {
        Self {
            boundary,
            level,
            objects: Vec::new(),
            children: None,
        }
    }

    #[inline]
    pub fn boundary(&self) -> BoundingBox {
        self.boundary
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Entries held directly by this node
    #[inline]
    pub fn objects(&self) -> &[Proxy] {
        &self.objects
    }

    /// The four quadrants, if the node has divided
    #[inline]
    pub fn children(&self) -> Option<&[QuadNode; 4]> {
        self.children.as_deref()
    }

    #[inline]
    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    fn insert(&mut self, proxy: Proxy, capacity: usize, max_level: u32) -> bool {
        if !self.boundary.overlaps(&proxy.bounds) {
            return false;
        }
        self.place(proxy, capacity, max_level);
        true
    }

    /// Stores an entry already known to belong to this node
    fn place(&mut self, proxy: Proxy, capacity: usize, max_level: u32) {
        if self.children.is_none() {
            if self.objects.len() < capacity || self.level >= max_level {
                self.objects.push(proxy);
                return;
            }
            self.subdivide(capacity, max_level);
        }
        self.push_down(proxy, capacity, max_level);
    }

    /// Hands an entry to the one child that fully contains it. Entries that
    /// straddle a quadrant edge stay here.
    fn push_down(&mut self, proxy: Proxy, capacity: usize, max_level: u32) {
        if let Some(children) = self.children.as_mut() {
            if let Some(child) = children
                .iter_mut()
                .find(|child| child.boundary.contains_box(&proxy.bounds))
            {
                child.place(proxy, capacity, max_level);
                return;
            }
        }
        self.objects.push(proxy);
    }

    /// Splits the boundary into four quadrants and re-distributes the entries.
    ///
    /// Half extents are truncated toward zero; the east and south quadrants
    /// take the remainder, so the quadrants never overlap and always tile
    /// the parent exactly.
    fn subdivide(&mut self, capacity: usize, max_level: u32) {
        let b = self.boundary;
        let hw = (b.width / 2.0).trunc();
        let hh = (b.height / 2.0).trunc();
        let (rw, rh) = (b.width - hw, b.height - hh);
        let level = self.level + 1;

        self.children = Some(Box::new([
            QuadNode::new(BoundingBox::new(b.x, b.y, hw, hh), level),
            QuadNode::new(BoundingBox::new(b.x + hw, b.y, rw, hh), level),
            QuadNode::new(BoundingBox::new(b.x, b.y + hh, hw, rh), level),
            QuadNode::new(BoundingBox::new(b.x + hw, b.y + hh, rw, rh), level),
        ]));

        for proxy in std::mem::take(&mut self.objects) {
            self.push_down(proxy, capacity, max_level);
        }
    }

    fn query_into(&self, range: &BoundingBox, found: &mut Vec<Proxy>) {
        if !self.boundary.overlaps(range) {
            return;
        }

        found.extend(self.objects.iter().filter(|proxy| range.overlaps(&proxy.bounds)));

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_into(range, found);
            }
        }
    }

    fn depth(&self) -> u32 {
        match &self.children {
            Some(children) => children.iter().map(QuadNode::depth).max().unwrap_or(self.level),
            None => self.level,
        }
    }
}

/// Region quadtree broad-phase.
///
/// A node keeps up to `capacity` entries before dividing; nodes at `max_level`
/// never divide. After a division an entry moves to the quadrant that fully
/// contains it, or stays at the node if it crosses a quadrant edge, so every
/// accepted entry is reachable by `query` and none is stored twice.
#[derive(Debug, Clone)]
pub struct Quadtree {
    root: QuadNode,
    capacity: usize,
    max_level: u32,
    len: usize,
}

impl Quadtree {
    pub const DEFAULT_CAPACITY: usize = 4;
    pub const DEFAULT_MAX_LEVEL: u32 = 5;

    /// Creates an empty quadtree over `boundary`
    pub fn new(boundary: BoundingBox, capacity: usize, max_level: u32) -> Result<Self> {
        if capacity == 0 {
            return Err(SimError::InvalidConfig(
                "quadtree capacity must be at least 1".to_string(),
            ));
        }
        if boundary.is_degenerate() {
            return Err(SimError::InvalidConfig(format!(
                "quadtree boundary must have a positive area, got {:?}",
                boundary
            )));
        }

        Ok(Self {
            root: QuadNode::new(boundary, 0),
            capacity,
            max_level,
            len: 0,
        })
    }

    /// Creates a quadtree with capacity 4 and max level 5
    pub fn with_defaults(boundary: BoundingBox) -> Result<Self> {
        Self::new(boundary, Self::DEFAULT_CAPACITY, Self::DEFAULT_MAX_LEVEL)
    }

    #[inline]
    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Level of the deepest node currently in the tree
    pub fn depth(&self) -> u32 {
        self.root.depth()
    }
}

impl BroadPhase for Quadtree {
    fn clear(&mut self) {
        self.root = QuadNode::new(self.root.boundary, 0);
        self.len = 0;
    }

    fn insert(&mut self, proxy: Proxy) -> bool {
        let accepted = self.root.insert(proxy, self.capacity, self.max_level);
        if accepted {
            self.len += 1;
        }
        accepted
    }

    fn query(&self, range: &BoundingBox) -> Vec<Proxy> {
        let mut found = Vec::new();
        self.root.query_into(range, &mut found);
        found
    }

    fn len(&self) -> usize {
        self.len
    }

    fn bounds(&self) -> BoundingBox {
        self.root.boundary
    }

    fn name(&self) -> &str {
        "Quadtree"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BodyHandle;

    fn proxy(id: u32, x: f32, y: f32, w: f32, h: f32) -> Proxy {
        Proxy::new(BodyHandle::from_raw(id), BoundingBox::new(x, y, w, h))
    }

    #[test]
    fn divides_when_full() {
        let mut tree = Quadtree::new(BoundingBox::new(0.0, 0.0, 100.0, 100.0), 2, 5).unwrap();
        tree.insert(proxy(1, 10.0, 10.0, 5.0, 5.0));
        tree.insert(proxy(2, 60.0, 10.0, 5.0, 5.0));
        assert!(!tree.root().is_divided());

        tree.insert(proxy(3, 10.0, 60.0, 5.0, 5.0));
        assert!(tree.root().is_divided());
        assert!(tree.root().objects().is_empty());

        let children = tree.root().children().unwrap();
        assert_eq!(children[0].objects().len(), 1);
        assert_eq!(children[1].objects().len(), 1);
        assert_eq!(children[2].objects().len(), 1);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn straddling_entries_stay_at_parent() {
        let mut tree = Quadtree::new(BoundingBox::new(0.0, 0.0, 100.0, 100.0), 1, 5).unwrap();
        tree.insert(proxy(1, 10.0, 10.0, 5.0, 5.0));
        // Crosses the vertical midline
        tree.insert(proxy(2, 45.0, 10.0, 10.0, 5.0));

        assert!(tree.root().is_divided());
        assert_eq!(tree.root().objects().len(), 1);
        assert_eq!(tree.root().objects()[0].handle, BodyHandle::from_raw(2));

        let found = tree.query(&BoundingBox::new(52.0, 11.0, 1.0, 1.0));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].handle, BodyHandle::from_raw(2));
    }

    #[test]
    fn odd_boundary_quadrants_tile_parent() {
        let mut tree = Quadtree::new(BoundingBox::new(0.0, 0.0, 5.0, 7.0), 1, 5).unwrap();
        tree.insert(proxy(1, 0.0, 0.0, 1.0, 1.0));
        tree.insert(proxy(2, 4.0, 6.0, 1.0, 1.0));

        let children = tree.root().children().unwrap();
        assert_eq!(children[0].boundary(), BoundingBox::new(0.0, 0.0, 2.0, 3.0));
        assert_eq!(children[1].boundary(), BoundingBox::new(2.0, 0.0, 3.0, 3.0));
        assert_eq!(children[2].boundary(), BoundingBox::new(0.0, 3.0, 2.0, 4.0));
        assert_eq!(children[3].boundary(), BoundingBox::new(2.0, 3.0, 3.0, 4.0));

        let area: f32 = children.iter().map(|c| c.boundary().area()).sum();
        assert_eq!(area, 35.0);
        assert_eq!(tree.query(&tree.bounds()).len(), 2);
    }

    #[test]
    fn depth_is_bounded_by_max_level() {
        let mut tree = Quadtree::new(BoundingBox::new(0.0, 0.0, 64.0, 64.0), 1, 3).unwrap();
        for id in 0..20 {
            tree.insert(proxy(id, 0.1, 0.1, 0.5, 0.5));
        }
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.query(&tree.bounds()).len(), 20);
    }

    #[test]
    fn rejects_entries_outside_boundary() {
        let mut tree = Quadtree::with_defaults(BoundingBox::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(!tree.insert(proxy(1, 10.0, 0.0, 5.0, 5.0)));
        assert!(tree.is_empty());
    }

    #[test]
    fn clear_keeps_boundary() {
        let mut tree = Quadtree::new(BoundingBox::new(0.0, 0.0, 10.0, 10.0), 1, 4).unwrap();
        tree.insert(proxy(1, 1.0, 1.0, 1.0, 1.0));
        tree.insert(proxy(2, 6.0, 6.0, 1.0, 1.0));
        tree.clear();
        assert!(tree.is_empty());
        assert!(!tree.root().is_divided());
        assert_eq!(tree.bounds(), BoundingBox::new(0.0, 0.0, 10.0, 10.0));
    }
}
