use crate::collision::BroadPhaseConfig;
use crate::error::SimError;
use crate::math::BoundingBox;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for the simulation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// The time step used by `SimulationWorld::step_fixed`
    pub time_step: f32,

    /// Per-step velocity multiplier for moving bodies, in `[0, 1]`.
    /// Applied once per step regardless of `dt`.
    pub friction: f32,

    /// The region the broad phase covers
    pub world_bounds: BoundingBox,

    /// Which broad-phase index to use
    pub broad_phase: BroadPhaseConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: 1.0 / 60.0,
            friction: 0.98,
            world_bounds: BoundingBox::new(0.0, 0.0, 800.0, 600.0),
            broad_phase: BroadPhaseConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Creates a config for a world of the given size, other values default
    pub fn with_world_size(width: f32, height: f32) -> Self {
        Self {
            world_bounds: BoundingBox::new(0.0, 0.0, width, height),
            ..Self::default()
        }
    }

    /// Builder-style broad-phase setter
    pub fn with_broad_phase(mut self, broad_phase: BroadPhaseConfig) -> Self {
        self.broad_phase = broad_phase;
        self
    }

    /// Builder-style friction setter
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Checks every parameter; a world refuses to start with an invalid config
    pub fn validate(&self) -> Result<()> {
        if !(self.time_step > 0.0) || !self.time_step.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "time step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if !(0.0..=1.0).contains(&self.friction) {
            return Err(SimError::InvalidConfig(format!(
                "friction must be within [0, 1], got {}",
                self.friction
            )));
        }
        if self.world_bounds.is_degenerate() {
            return Err(SimError::InvalidConfig(format!(
                "world bounds must have a positive area, got {:?}",
                self.world_bounds
            )));
        }
        self.broad_phase.validate()
    }
}
