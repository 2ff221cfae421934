use crate::bodies::Body;

/// Trait for advancing a body's position over a time step
pub trait Integrator {
    /// Integrates a body over a time step. Static bodies are left untouched.
    fn integrate(&mut self, body: &mut Body, dt: f32);

    /// Updates the per-step velocity decay
    fn set_friction(&mut self, friction: f32);

    /// Returns the name of the integrator
    fn name(&self) -> &str;
}
