//! Animator Configuration
//!
//! [`AnimatorConfig`] gathers every asset- and scene-specific value the
//! animator uses. All fields have defaults, so a JSON file only needs the
//! entries it overrides.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use airship::animator::AnimatorConfig;
//!
//! // Defaults: trajectory 0 of `trajectories.npy`, airship "airshipv5"
//! let config = AnimatorConfig::default();
//!
//! // Partial override from JSON
//! let config = AnimatorConfig::from_json_str(r#"{ "trajectory_index": 4 }"#)?;
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::scene::{TrackAxis, UpAxis};
use crate::trajectory::chase_camera::DEFAULT_CAMERA_OFFSET;
use crate::trajectory::{ChaseCameraRig, DEFAULT_YAW_OFFSET, SolverConfig};

/// Camera orientation used when the chase camera has to be created.
pub const DEFAULT_CAMERA_SPAWN_ROTATION: DVec3 = DVec3::new(0.921_532, 0.0, 0.460_765);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    // === Trajectory ===
    /// `.npy` or `.json` file holding `[T, S, 6]` trajectory data.
    pub trajectory_file: PathBuf,
    pub trajectory_index: usize,
    /// Frame number given to the first sample.
    pub start_frame: i64,

    // === Scene objects ===
    pub airship_name: String,
    pub camera_name: String,

    // === Asset conventions ===
    /// Added to the tangent heading to match the airship model's forward axis.
    pub yaw_offset: f64,
    /// Chase camera position relative to the airship, in world axes.
    pub camera_offset: DVec3,

    // === Camera creation & aiming ===
    pub camera_spawn_location: DVec3,
    pub camera_spawn_rotation: DVec3,
    pub track_axis: TrackAxis,
    pub up_axis: UpAxis,

    // === Path preview ===
    pub create_path_curve: bool,
    pub path_curve_name: String,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            trajectory_file: PathBuf::from("trajectories.npy"),
            trajectory_index: 0,
            start_frame: 0,

            airship_name: "airshipv5".to_string(),
            camera_name: "FollowingCamera".to_string(),

            yaw_offset: DEFAULT_YAW_OFFSET,
            camera_offset: DEFAULT_CAMERA_OFFSET,

            camera_spawn_location: DVec3::ZERO,
            camera_spawn_rotation: DEFAULT_CAMERA_SPAWN_ROTATION,
            track_axis: TrackAxis::NegativeZ,
            up_axis: UpAxis::Y,

            create_path_curve: true,
            path_curve_name: "TrajectoryPath".to_string(),
        }
    }
}

impl AnimatorConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[inline]
    #[must_use]
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            yaw_offset: self.yaw_offset,
        }
    }

    #[inline]
    #[must_use]
    pub fn camera_rig(&self) -> ChaseCameraRig {
        ChaseCameraRig::new(self.camera_offset)
    }
}
