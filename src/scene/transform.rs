use glam::{DQuat, DVec3, EulerRot};
use serde::Serialize;

/// Static placement of a scene object: location plus XYZ Euler rotation.
///
/// Keyframed objects also carry tracks on [`SceneObject`](crate::scene::SceneObject);
/// this holds the value most recently written, which is also the fallback
/// when a track has no keys.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Transform {
    pub position: DVec3,
    pub rotation_euler: DVec3,
}

impl Transform {
    #[must_use]
    pub fn new(position: DVec3, rotation_euler: DVec3) -> Self {
        Self {
            position,
            rotation_euler,
        }
    }

    /// Helper: set the Euler rotation (XYZ order).
    pub fn set_rotation_euler(&mut self, x: f64, y: f64, z: f64) {
        self.rotation_euler = DVec3::new(x, y, z);
    }

    #[must_use]
    pub fn rotation(&self) -> DQuat {
        let r = self.rotation_euler;
        DQuat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    }

    pub fn set_rotation(&mut self, rotation: DQuat) {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        self.rotation_euler = DVec3::new(x, y, z);
    }
}
