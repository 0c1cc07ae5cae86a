//! Keyframe storage for animated scene objects.

pub mod tracks;
pub mod values;

pub use tracks::{InterpolationMode, KeyframeTrack};
pub use values::Interpolatable;
