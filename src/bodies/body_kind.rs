use crate::math::Vector2;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Opaque key for a sprite owned by the host's asset layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TextureId(pub u32);

/// Kind of body, determining whether and how it moves
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BodyKind {
    /// Never moves and has no velocity
    Static,

    /// Integrates its velocity every step and is pushed out of obstacles
    Kinematic {
        velocity: Vector2,
    },

    /// Sprite-backed body sized from its image.
    ///
    /// `velocity: None` is a static sprite, `Some(_)` moves exactly like
    /// [`BodyKind::Kinematic`].
    Textured {
        texture: TextureId,
        velocity: Option<Vector2>,
    },
}

impl BodyKind {
    /// Returns true if this kind integrates velocity
    #[inline]
    pub fn is_moving(&self) -> bool {
        match self {
            BodyKind::Static => false,
            BodyKind::Kinematic { .. } => true,
            BodyKind::Textured { velocity, .. } => velocity.is_some(),
        }
    }

    /// Current velocity, zero for static variants
    #[inline]
    pub fn velocity(&self) -> Vector2 {
        match self {
            BodyKind::Static => Vector2::zero(),
            BodyKind::Kinematic { velocity } => *velocity,
            BodyKind::Textured { velocity, .. } => velocity.unwrap_or_default(),
        }
    }

    /// Mutable access to the velocity of a moving variant
    #[inline]
    pub fn velocity_mut(&mut self) -> Option<&mut Vector2> {
        match self {
            BodyKind::Static => None,
            BodyKind::Kinematic { velocity } => Some(velocity),
            BodyKind::Textured { velocity, .. } => velocity.as_mut(),
        }
    }

    /// Texture key for sprite-backed bodies
    #[inline]
    pub fn texture(&self) -> Option<TextureId> {
        match self {
            BodyKind::Textured { texture, .. } => Some(*texture),
            _ => None,
        }
    }
}
