use crate::collision::Axes;
use crate::core::BodyHandle;
use std::collections::VecDeque;

/// A moving body was pushed back by a neighbor during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    /// The body that was corrected
    pub body: BodyHandle,

    /// The neighbor it was corrected against
    pub other: BodyHandle,

    /// Axes the correction was applied on
    pub axes: Axes,
}

/// Types of body events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEventType {
    /// A body has been added to the world
    Added,

    /// A body has been removed from the world
    Removed,

    /// A body lies entirely outside the world bounds and was left out of the index
    OutOfBounds,
}

/// An event related to a single body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyEvent {
    /// The type of body event
    pub event_type: BodyEventType,

    /// The body that the event refers to
    pub body: BodyHandle,
}

/// A queue of simulation events
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Collision events
    collision_events: VecDeque<CollisionEvent>,

    /// Body events
    body_events: VecDeque<BodyEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_collision_event(&mut self, event: CollisionEvent) {
        self.collision_events.push_back(event);
    }

    pub fn add_body_event(&mut self, event: BodyEvent) {
        self.body_events.push_back(event);
    }

    /// Gets the next collision event from the queue
    pub fn next_collision_event(&mut self) -> Option<CollisionEvent> {
        self.collision_events.pop_front()
    }

    /// Gets the next body event from the queue
    pub fn next_body_event(&mut self) -> Option<BodyEvent> {
        self.body_events.pop_front()
    }

    pub fn has_collision_events(&self) -> bool {
        !self.collision_events.is_empty()
    }

    pub fn has_body_events(&self) -> bool {
        !self.body_events.is_empty()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.collision_events.is_empty() && self.body_events.is_empty()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.collision_events.clear();
        self.body_events.clear();
    }

    /// Drops the events a step produces (collisions and out-of-bounds
    /// reports), keeping queued `Added`/`Removed` events
    pub fn clear_step_events(&mut self) {
        self.collision_events.clear();
        self.body_events
            .retain(|e| e.event_type != BodyEventType::OutOfBounds);
    }

    /// Gets all body events of a specific type
    pub fn get_body_events_of_type(&self, event_type: BodyEventType) -> Vec<&BodyEvent> {
        self.body_events
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Gets all collision events involving a specific body, on either side
    pub fn get_collision_events_for_body(&self, body: BodyHandle) -> Vec<&CollisionEvent> {
        self.collision_events
            .iter()
            .filter(|e| e.body == body || e.other == body)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_event(event_type: BodyEventType, id: u32) -> BodyEvent {
        BodyEvent { event_type, body: BodyHandle::from_raw(id) }
    }

    #[test]
    fn drains_in_insertion_order() {
        let mut queue = EventQueue::new();
        queue.add_body_event(body_event(BodyEventType::Added, 1));
        queue.add_body_event(body_event(BodyEventType::Removed, 1));
        queue.add_collision_event(CollisionEvent {
            body: BodyHandle::from_raw(2),
            other: BodyHandle::from_raw(3),
            axes: Axes::Y,
        });

        assert_eq!(queue.next_body_event(), Some(body_event(BodyEventType::Added, 1)));
        assert_eq!(queue.next_body_event(), Some(body_event(BodyEventType::Removed, 1)));
        assert!(!queue.has_body_events());
        assert!(queue.next_body_event().is_none());

        let hit = queue.next_collision_event().unwrap();
        assert_eq!(hit.other, BodyHandle::from_raw(3));
        assert!(queue.is_empty());
    }

    #[test]
    fn step_clear_keeps_lifecycle_events() {
        let mut queue = EventQueue::new();
        queue.add_body_event(body_event(BodyEventType::Added, 1));
        queue.add_body_event(body_event(BodyEventType::OutOfBounds, 1));
        queue.add_body_event(body_event(BodyEventType::Removed, 2));
        queue.add_collision_event(CollisionEvent {
            body: BodyHandle::from_raw(1),
            other: BodyHandle::from_raw(2),
            axes: Axes::X | Axes::Y,
        });

        queue.clear_step_events();

        assert!(!queue.has_collision_events());
        assert!(queue.get_body_events_of_type(BodyEventType::OutOfBounds).is_empty());
        assert_eq!(queue.next_body_event(), Some(body_event(BodyEventType::Added, 1)));
        assert_eq!(queue.next_body_event(), Some(body_event(BodyEventType::Removed, 2)));

        queue.add_body_event(body_event(BodyEventType::Added, 3));
        queue.clear();
        assert!(queue.is_empty());
    }
}
