pub mod world;
pub mod config;
pub mod storage;
pub mod events;

pub use self::world::SimulationWorld;
pub use self::config::SimulationConfig;
pub use self::storage::BodyStorage;
pub use self::events::{EventQueue, CollisionEvent, BodyEvent, BodyEventType};

/// A unique identifier for a body in the simulation.
///
/// Handles are issued in increasing order and never reused by a world, so
/// sorting by handle gives a stable, creation-ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    /// Builds a handle from its raw id, for hosts and tests that drive an index directly
    #[inline]
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// The raw id
    #[inline]
    pub fn id(&self) -> u32 {
        self.0
    }
}
