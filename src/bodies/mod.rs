mod body;
mod body_kind;

pub use self::body::Body;
pub use self::body_kind::{BodyKind, TextureId};
pub use self::body_flags::BodyFlags;

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    #[cfg(feature = "serialize")]
    use serde::{Serialize, Deserialize};

    bitflags! {
        /// Flags for controlling how a body takes part in collision resolution
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
        pub struct BodyFlags: u32 {
            /// Invert velocity on impact instead of zeroing it
            const BOUNCE = 0x01;

            /// Body is never indexed, so nothing collides with it
            const TRIGGER = 0x02;

            /// Resolver hits against this body are reported in the event queue
            const GENERATE_COLLISION_EVENTS = 0x04;
        }
    }
}
