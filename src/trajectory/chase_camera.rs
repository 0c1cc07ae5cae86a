use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::trajectory::OrientedFrame;

/// Default rig: behind, to the side of, and above the target.
pub const DEFAULT_CAMERA_OFFSET: DVec3 = DVec3::new(-150.0, -500.0, 65.0);

/// Places a chase camera at a fixed world-space offset from the target.
///
/// Only the position is derived. Aiming is left to a track-to constraint
/// on the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChaseCameraRig {
    pub offset: DVec3,
}

impl ChaseCameraRig {
    #[must_use]
    pub fn new(offset: DVec3) -> Self {
        Self { offset }
    }

    #[inline]
    #[must_use]
    pub fn camera_position(&self, frame: &OrientedFrame) -> DVec3 {
        frame.position + self.offset
    }
}

impl Default for ChaseCameraRig {
    fn default() -> Self {
        Self::new(DEFAULT_CAMERA_OFFSET)
    }
}
