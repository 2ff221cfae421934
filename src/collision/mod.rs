pub mod broad_phase;
pub mod grid;
pub mod quadtree;
pub mod resolver;

pub use self::broad_phase::{BroadPhase, BroadPhaseConfig, Proxy};
pub use self::grid::Grid;
pub use self::quadtree::{Quadtree, QuadNode};
pub use self::resolver::{move_and_slide, Axes, SlideHit};
