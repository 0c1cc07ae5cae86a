//! Keyframe animation of an airship and its chase camera along a
//! precomputed trajectory.
//!
//! The heart of the crate is [`TrajectoryOrientationSolver`], which turns a
//! list of `[x, y, z, roll, pitch, yaw]` samples into per-frame poses whose
//! yaw follows the path tangent. Everything host-specific sits behind
//! [`SceneAdapter`]; [`Scene`] is an in-memory implementation.

pub mod animation;
pub mod animator;
pub mod assets;
pub mod errors;
pub mod scene;
pub mod trajectory;

pub use animator::{AirshipAnimator, AnimationReport, AnimatorConfig};
pub use assets::{TrajectorySource, TrajectorySourceVariant, load_trajectories};
pub use errors::{AirshipError, Result};
pub use scene::{AnimationTarget, ObjectKey, Scene, SceneAdapter};
pub use trajectory::{
    ChaseCameraRig, OrientedFrame, Orientation, PoseSample, SolverConfig, Trajectory,
    TrajectoryOrientationSolver, TrajectorySet, TrajectorySummary,
};
