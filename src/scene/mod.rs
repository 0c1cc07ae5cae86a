//! Scene Module
//!
//! Host-scene boundary and an in-memory scene:
//! - [`SceneAdapter`]: everything the animator asks of a host scene
//! - [`AnimationTarget`]: per-frame pose sink
//! - [`Scene`]: in-memory adapter with keyframe tracks and constraints
//! - [`TrackToConstraint`]: aims an object's axis at a target

pub mod adapter;
pub mod constraint;
pub mod object;
pub mod scene;
pub mod transform;

pub use adapter::{AnimationTarget, SceneAdapter, TargetHandle, apply_frames};
pub use constraint::{Constraint, TrackAxis, TrackToConstraint, UpAxis, WORLD_UP, aim_rotation};
pub use object::{ObjectKind, SceneObject};
pub use scene::{EvaluatedPose, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct ObjectKey;
}
