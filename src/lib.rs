pub mod math;
pub mod core;
pub mod bodies;
pub mod collision;
pub mod integration;

/// Re-export common types for easier usage
pub use crate::core::{SimulationWorld, SimulationConfig, BodyHandle};
pub use crate::bodies::{Body, BodyKind, BodyFlags, TextureId};
pub use crate::collision::{BroadPhase, BroadPhaseConfig, Grid, Quadtree, Proxy};
pub use crate::math::{BoundingBox, Vector2};

/// Error types for the simulation core
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum SimError {
        /// Construction parameters that can never produce a working index or world
        #[error("Invalid configuration: {0}")]
        InvalidConfig(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),
    }
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, error::SimError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
