use crate::bodies::{body_flags::BodyFlags, BodyKind, TextureId};
use crate::math::{BoundingBox, Vector2};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A rectangle taking part in the simulation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Body {
    /// Top-left corner in world space
    position: Vector2,

    /// Width and height
    size: Vector2,

    /// Whether and how the body moves
    kind: BodyKind,

    /// Behavior flags
    flags: BodyFlags,
}

impl Body {
    /// Creates a new body of the given kind
    pub fn new(position: Vector2, size: Vector2, kind: BodyKind) -> Self {
        Self {
            position,
            size,
            kind,
            flags: BodyFlags::GENERATE_COLLISION_EVENTS,
        }
    }

    /// Creates a body that never moves
    pub fn new_static(position: Vector2, size: Vector2) -> Self {
        Self::new(position, size, BodyKind::Static)
    }

    /// Creates a kinematic body at rest
    pub fn new_kinematic(position: Vector2, size: Vector2) -> Self {
        Self::new(position, size, BodyKind::Kinematic { velocity: Vector2::zero() })
    }

    /// Creates a sprite-backed body; `size` is the image's dimensions
    pub fn new_textured(position: Vector2, size: Vector2, texture: TextureId, moving: bool) -> Self {
        let velocity = if moving { Some(Vector2::zero()) } else { None };
        Self::new(position, size, BodyKind::Textured { texture, velocity })
    }

    /// Builder-style flag setter
    pub fn with_flags(mut self, flags: BodyFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Builder-style velocity setter; ignored for static variants
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.set_velocity(velocity);
        self
    }

    #[inline]
    pub fn get_position(&self) -> Vector2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    #[inline]
    pub fn get_size(&self) -> Vector2 {
        self.size
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// The body's current bounding box, always in sync with its position
    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_position_size(self.position, self.size)
    }

    #[inline]
    pub fn get_kind(&self) -> &BodyKind {
        &self.kind
    }

    /// Returns true for kinematic bodies and moving sprites
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.kind.is_moving()
    }

    /// Returns the velocity, zero for static bodies
    #[inline]
    pub fn get_velocity(&self) -> Vector2 {
        self.kind.velocity()
    }

    /// Sets the velocity. Returns false (and changes nothing) for static bodies.
    pub fn set_velocity(&mut self, velocity: Vector2) -> bool {
        match self.kind.velocity_mut() {
            Some(v) => {
                *v = velocity;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn get_texture(&self) -> Option<TextureId> {
        self.kind.texture()
    }

    #[inline]
    pub fn get_flags(&self) -> BodyFlags {
        self.flags
    }

    #[inline]
    pub fn set_flags(&mut self, flags: BodyFlags) {
        self.flags = flags;
    }

    #[inline]
    pub fn is_bouncy(&self) -> bool {
        self.flags.contains(BodyFlags::BOUNCE)
    }

    #[inline]
    pub fn is_trigger(&self) -> bool {
        self.flags.contains(BodyFlags::TRIGGER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_body_ignores_velocity() {
        let mut body = Body::new_static(Vector2::new(1.0, 2.0), Vector2::new(3.0, 4.0));
        assert!(!body.set_velocity(Vector2::new(5.0, 5.0)));
        assert_eq!(body.get_velocity(), Vector2::zero());
        assert!(!body.is_moving());
    }

    #[test]
    fn textured_body_defaults() {
        let still = Body::new_textured(Vector2::zero(), Vector2::new(16.0, 16.0), TextureId(7), false);
        assert!(!still.is_moving());
        assert_eq!(still.get_texture(), Some(TextureId(7)));

        let moving = Body::new_textured(Vector2::zero(), Vector2::new(16.0, 16.0), TextureId(7), true)
            .with_velocity(Vector2::new(1.0, 0.0));
        assert!(moving.is_moving());
        assert_eq!(moving.get_velocity(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn bounding_box_follows_position() {
        let mut body = Body::new_kinematic(Vector2::zero(), Vector2::new(10.0, 5.0));
        body.set_position(Vector2::new(3.0, 4.0));
        assert_eq!(body.bounding_box(), BoundingBox::new(3.0, 4.0, 10.0, 5.0));
        assert_eq!(body.width(), 10.0);
        assert_eq!(body.height(), 5.0);
    }
}
