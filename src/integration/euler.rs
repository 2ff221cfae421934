use crate::bodies::Body;
use crate::integration::Integrator;

/// Forward Euler integrator with per-step exponential friction.
///
/// Position advances by `velocity * dt` using the velocity from before the
/// step, then velocity is multiplied by `friction`. The decay is per call,
/// not scaled by `dt`.
#[derive(Debug, Clone, Copy)]
pub struct EulerIntegrator {
    friction: f32,
}

impl EulerIntegrator {
    /// Creates a new Euler integrator with the given friction coefficient
    pub fn new(friction: f32) -> Self {
        Self { friction }
    }

    pub fn get_friction(&self) -> f32 {
        self.friction
    }
}

impl Integrator for EulerIntegrator {
    fn integrate(&mut self, body: &mut Body, dt: f32) {
        if !body.is_moving() {
            return;
        }

        let velocity = body.get_velocity();
        body.set_position(body.get_position() + velocity * dt);
        body.set_velocity(velocity * self.friction);
    }

    fn set_friction(&mut self, friction: f32) {
        self.friction = friction;
    }

    fn name(&self) -> &str {
        "Euler"
    }
}
