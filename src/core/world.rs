use crate::bodies::Body;
use crate::collision::{move_and_slide, BroadPhase, Proxy};
use crate::core::{
    BodyHandle, SimulationConfig, EventQueue, BodyEvent, BodyEventType, CollisionEvent, BodyStorage,
};
use crate::bodies::BodyFlags;
use crate::integration::{EulerIntegrator, Integrator};
use crate::math::{BoundingBox, Vector2};
use crate::Result;

/// Owns every body, the broad-phase index and the event queue, and advances
/// them one step at a time.
///
/// A step integrates moving bodies, rebuilds the index once from the
/// post-integration boxes, then resolves moving bodies in ascending handle
/// order. Neighbor boxes come from that single rebuild, so a body resolved
/// later in the step sees where earlier siblings were before their correction.
pub struct SimulationWorld {
    /// All bodies in the world
    bodies: BodyStorage<Body>,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Spatial index, rebuilt from scratch whenever it is needed
    broad_phase: Box<dyn BroadPhase>,

    /// Advances positions each step
    integrator: Box<dyn Integrator>,

    /// Queue of events produced by the last step
    events: EventQueue,

    /// The total elapsed simulation time
    time: f32,

    /// Bodies changed since the index was last built
    index_stale: bool,
}

impl SimulationWorld {
    /// Creates a new world, failing if the configuration is invalid
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let broad_phase = config.broad_phase.build(config.world_bounds)?;

        log::debug!(
            "creating simulation world: bounds {:?}, broad phase {}, friction {}",
            config.world_bounds,
            broad_phase.name(),
            config.friction
        );

        Ok(Self {
            bodies: BodyStorage::new(),
            integrator: Box::new(EulerIntegrator::new(config.friction)),
            config,
            broad_phase,
            events: EventQueue::new(),
            time: 0.0,
            index_stale: true,
        })
    }

    /// Returns the current simulation time
    pub fn get_time(&self) -> f32 {
        self.time
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Changes the friction coefficient and passes it to the active integrator
    pub fn set_friction(&mut self, friction: f32) -> Result<()> {
        let config = self.config.clone().with_friction(friction);
        config.validate()?;
        self.config = config;
        self.integrator.set_friction(friction);
        Ok(())
    }

    /// Replaces the integrator used to advance moving bodies. The configured
    /// friction is handed to the new integrator.
    pub fn set_integrator(&mut self, mut integrator: Box<dyn Integrator>) {
        log::debug!("switching integrator to {}", integrator.name());
        integrator.set_friction(self.config.friction);
        self.integrator = integrator;
    }

    /// Name of the active integrator
    pub fn integrator_name(&self) -> &str {
        self.integrator.name()
    }

    /// Name of the active broad-phase index
    pub fn broad_phase_name(&self) -> &str {
        self.broad_phase.name()
    }

    /// Adds a body to the world and returns its handle
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = self.bodies.add(body);
        log::debug!("added body {:?}", handle);

        self.index_stale = true;
        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Added,
            body: handle,
        });

        handle
    }

    /// Removes a body from the world. The index forgets it before its next use.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<Body> {
        let body = self.bodies.remove_body(handle)?;
        log::debug!("removed body {:?}", handle);

        self.index_stale = true;
        self.events.add_body_event(BodyEvent {
            event_type: BodyEventType::Removed,
            body: handle,
        });

        Ok(body)
    }

    /// Gets a reference to a body by its handle
    pub fn get_body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies.get_body(handle)
    }

    /// Gets a mutable reference to a body by its handle
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        let body = self.bodies.get_body_mut(handle)?;
        self.index_stale = true;
        Ok(body)
    }

    /// Iterates all bodies in ascending handle order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.bodies.iter()
    }

    /// Returns the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Returns a reference to the event queue.
    ///
    /// Collision and out-of-bounds events describe the last step and are
    /// replaced by the next one. `Added` and `Removed` events stay queued
    /// across steps until the host drains them with `next_body_event` or
    /// clears the queue.
    pub fn get_events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns a mutable reference to the event queue
    pub fn get_events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Handles of bodies whose boxes overlap `range`, in ascending order.
    /// Rebuilds the index first if bodies changed since it was last built.
    pub fn query(&mut self, range: &BoundingBox) -> Vec<BodyHandle> {
        if self.index_stale {
            self.rebuild_index();
        }

        let mut handles: Vec<BodyHandle> = self
            .broad_phase
            .query(range)
            .into_iter()
            .map(|proxy| proxy.handle)
            .collect();
        handles.sort();
        handles.dedup();
        handles
    }

    /// Advances the simulation by `config.time_step`
    pub fn step_fixed(&mut self) {
        self.step(self.config.time_step);
    }

    /// Runs one simulation step of length `dt`
    pub fn step(&mut self, dt: f32) {
        self.events.clear_step_events();

        for (_, body) in self.bodies.iter_mut() {
            self.integrator.integrate(body, dt);
        }

        for handle in self.rebuild_index() {
            self.events.add_body_event(BodyEvent {
                event_type: BodyEventType::OutOfBounds,
                body: handle,
            });
        }

        let moving: Vec<BodyHandle> = self
            .bodies
            .iter()
            .filter(|(_, body)| body.is_moving() && !body.is_trigger())
            .map(|(handle, _)| handle)
            .collect();

        let mut corrections = 0usize;
        for handle in moving {
            let Some(body) = self.bodies.get_mut(handle) else {
                continue;
            };

            let mut neighbors = self.broad_phase.query(&body.bounding_box());
            neighbors.retain(|proxy| proxy.handle != handle);
            neighbors.sort_by_key(|proxy| proxy.handle);
            neighbors.dedup_by_key(|proxy| proxy.handle);

            let bounce = body.is_bouncy();
            let report = body.get_flags().contains(BodyFlags::GENERATE_COLLISION_EVENTS);
            let hits = move_and_slide(body, &neighbors, bounce);
            corrections += hits.len();

            if report {
                for hit in hits {
                    self.events.add_collision_event(CollisionEvent {
                        body: handle,
                        other: hit.other,
                        axes: hit.axes,
                    });
                }
            }
        }

        // Resolution moved bodies after the index was built
        self.index_stale = true;
        self.time += dt;

        log::trace!(
            "step dt={} bodies={} indexed={} corrections={}",
            dt,
            self.bodies.len(),
            self.broad_phase.len(),
            corrections
        );
    }

    /// Rebuilds the index from every non-trigger body and returns the handles
    /// that fell entirely outside the world bounds
    fn rebuild_index(&mut self) -> Vec<BodyHandle> {
        let proxies: Vec<Proxy> = self
            .bodies
            .iter()
            .filter(|(_, body)| !body.is_trigger())
            .map(|(handle, body)| Proxy::new(handle, body.bounding_box()))
            .collect();

        let rejected = self.broad_phase.rebuild(&proxies);
        for handle in &rejected {
            log::debug!("body {:?} is outside the world bounds, not indexed", handle);
        }

        self.index_stale = false;
        rejected
    }

    /// Removes every body and resets the clock
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.broad_phase.clear();
        self.events.clear();
        self.time = 0.0;
        self.index_stale = true;
    }

    /// Checks that a body exists, for hosts holding handles across removals
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Gets the current position of a body
    pub fn get_position(&self, handle: BodyHandle) -> Result<Vector2> {
        Ok(self.bodies.get_body(handle)?.get_position())
    }
}
