//! Axis-separated "move and slide" collision response.
//!
//! Neighbors are resolved one after another in the order given, and the
//! moving box is re-derived after each one, so the outcome depends on that
//! order when several neighbors overlap at once. Both axes are checked
//! against every neighbor; a diagonal hit can therefore be corrected on x and
//! y in the same pass, which may show as jitter at corners.

use bitflags::bitflags;

use crate::bodies::Body;
use crate::collision::Proxy;
use crate::core::BodyHandle;
use crate::math::BoundingBox;

bitflags! {
    /// Axes along which a correction was applied
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Axes: u8 {
        const X = 0x01;
        const Y = 0x02;
    }
}

/// A neighbor that pushed the moving body back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideHit {
    /// The neighbor the body was corrected against
    pub other: BodyHandle,

    /// Which axes were corrected
    pub axes: Axes,
}

#[inline]
fn reflect(v: f32, bounce: bool) -> f32 {
    if bounce {
        -v
    } else {
        0.0
    }
}

/// Pushes `body` out of every overlapping neighbor.
///
/// For each axis the direction of travel decides which edge the body is
/// clamped to: moving right snaps its right edge to the neighbor's left edge,
/// moving up snaps its top edge to the neighbor's bottom edge, and so on.
/// The velocity on a corrected axis is zeroed, or inverted when `bounce` is set.
/// Neighbors that do not overlap leave the body untouched.
pub fn move_and_slide(body: &mut Body, neighbors: &[Proxy], bounce: bool) -> Vec<SlideHit> {
    let size = body.get_size();
    let mut position = body.get_position();
    let mut velocity = body.get_velocity();
    let mut hits = Vec::new();

    for neighbor in neighbors {
        let current = BoundingBox::from_position_size(position, size);
        let other = &neighbor.bounds;
        if !current.overlaps(other) {
            continue;
        }

        let mut axes = Axes::empty();

        // Direction is sampled once per axis so a bounce cannot immediately
        // trigger the opposite-edge clamp against the same neighbor.
        if velocity.x > 0.0 {
            if current.right() > other.left() {
                position.x = other.left() - size.x;
                velocity.x = reflect(velocity.x, bounce);
                axes |= Axes::X;
            }
        } else if velocity.x < 0.0 && current.left() < other.right() {
            position.x = other.right();
            velocity.x = reflect(velocity.x, bounce);
            axes |= Axes::X;
        }

        if velocity.y > 0.0 {
            if current.bottom() > other.top() {
                position.y = other.top() - size.y;
                velocity.y = reflect(velocity.y, bounce);
                axes |= Axes::Y;
            }
        } else if velocity.y < 0.0 && current.top() < other.bottom() {
            position.y = other.bottom();
            velocity.y = reflect(velocity.y, bounce);
            axes |= Axes::Y;
        }

        if !axes.is_empty() {
            hits.push(SlideHit { other: neighbor.handle, axes });
        }
    }

    body.set_position(position);
    body.set_velocity(velocity);
    hits
}
