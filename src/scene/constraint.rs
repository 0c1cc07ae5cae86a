use glam::{DMat3, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::scene::ObjectKey;

/// World up axis of the scene (Z-up).
pub const WORLD_UP: DVec3 = DVec3::Z;

/// Local axis that a track-to constraint points at its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackAxis {
    PositiveX,
    PositiveY,
    PositiveZ,
    NegativeX,
    NegativeY,
    /// Cameras look down their local −Z.
    #[default]
    NegativeZ,
}

impl TrackAxis {
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::PositiveX | Self::NegativeX => 0,
            Self::PositiveY | Self::NegativeY => 1,
            Self::PositiveZ | Self::NegativeZ => 2,
        }
    }

    #[inline]
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::PositiveX | Self::PositiveY | Self::PositiveZ => 1.0,
            Self::NegativeX | Self::NegativeY | Self::NegativeZ => -1.0,
        }
    }

    /// The axis as a unit vector in local space.
    #[must_use]
    pub fn local_vector(self) -> DVec3 {
        DVec3::AXES[self.index()] * self.sign()
    }
}

/// Local axis kept as close as possible to [`WORLD_UP`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpAxis {
    X,
    #[default]
    Y,
    Z,
}

impl UpAxis {
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Keeps the owner's `track_axis` pointed at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackToConstraint {
    pub target: ObjectKey,
    pub track_axis: TrackAxis,
    pub up_axis: UpAxis,
}

impl TrackToConstraint {
    #[must_use]
    pub fn new(target: ObjectKey, track_axis: TrackAxis, up_axis: UpAxis) -> Self {
        Self {
            target,
            track_axis,
            up_axis,
        }
    }

    /// Rotation of an owner at `eye` aiming at `target_position`.
    #[must_use]
    pub fn aim_rotation(&self, eye: DVec3, target_position: DVec3) -> Option<DQuat> {
        aim_rotation(eye, target_position, self.track_axis, self.up_axis, WORLD_UP)
    }
}

/// Object-level constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Constraint {
    TrackTo(TrackToConstraint),
}

/// Builds the rotation that maps `track_axis` onto the direction from `eye`
/// to `target` and `up_axis` onto `world_up` projected orthogonal to it.
///
/// Returns `None` when the two axes coincide, when `eye == target`, or when
/// the view direction is parallel to `world_up`.
#[must_use]
pub fn aim_rotation(
    eye: DVec3,
    target: DVec3,
    track_axis: TrackAxis,
    up_axis: UpAxis,
    world_up: DVec3,
) -> Option<DQuat> {
    let t = track_axis.index();
    let u = up_axis.index();
    if t == u {
        return None;
    }

    // 1. Forward vector
    let forward = (target - eye).try_normalize()?;

    // 2. Up reference orthogonal to forward (degenerate when parallel)
    let up = (world_up - forward * world_up.dot(forward)).try_normalize()?;

    // 3. Complete a right-handed orthonormal basis
    let mut cols = [DVec3::ZERO; 3];
    cols[t] = forward * track_axis.sign();
    cols[u] = up;
    let k = 3 - t - u;
    cols[k] = cols[(k + 1) % 3].cross(cols[(k + 2) % 3]);

    Some(DQuat::from_mat3(&DMat3::from_cols(cols[0], cols[1], cols[2])))
}
