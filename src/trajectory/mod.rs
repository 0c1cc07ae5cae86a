//! Trajectory Module
//!
//! Pose samples, trajectories, and the heading solver that turns a
//! sampled path into per-frame poses:
//! - [`PoseSample`]: one row of trajectory data (position + roll/pitch/yaw)
//! - [`Trajectory`]: an ordered, time-indexed sequence of samples
//! - [`TrajectorySet`]: every trajectory loaded from one source
//! - [`TrajectoryOrientationSolver`]: derives a yaw from the path tangent
//! - [`ChaseCameraRig`]: fixed-offset chase camera placement
//! - [`TrajectorySummary`]: bounds and length of a trajectory

pub mod chase_camera;
pub mod solver;
pub mod summary;

pub use chase_camera::ChaseCameraRig;
pub use solver::{
    DEFAULT_YAW_OFFSET, FrameIter, OrientedFrame, OrientedFrames, Orientation, SolverConfig,
    TrajectoryOrientationSolver, heading_from_tangent, tangent_at,
};
pub use summary::TrajectorySummary;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::errors::{AirshipError, Result};

/// Number of scalar fields in one trajectory row.
pub const SAMPLE_FIELDS: usize = 6;

/// A single trajectory row.
///
/// The stored yaw is kept for completeness but never drives the animation;
/// the solver replaces it with a heading derived from the path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseSample {
    pub position: DVec3,
    pub roll: f64,
    pub pitch: f64,
    pub raw_yaw: f64,
}

impl PoseSample {
    #[must_use]
    pub fn new(position: DVec3, roll: f64, pitch: f64, raw_yaw: f64) -> Self {
        Self {
            position,
            roll,
            pitch,
            raw_yaw,
        }
    }

    /// Builds a sample from a `[x, y, z, roll, pitch, yaw]` row.
    #[inline]
    #[must_use]
    pub fn from_row(row: [f64; SAMPLE_FIELDS]) -> Self {
        let [x, y, z, roll, pitch, raw_yaw] = row;
        Self::new(DVec3::new(x, y, z), roll, pitch, raw_yaw)
    }

    #[inline]
    #[must_use]
    pub fn to_row(&self) -> [f64; SAMPLE_FIELDS] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.roll,
            self.pitch,
            self.raw_yaw,
        ]
    }
}

impl From<[f64; SAMPLE_FIELDS]> for PoseSample {
    fn from(row: [f64; SAMPLE_FIELDS]) -> Self {
        Self::from_row(row)
    }
}

/// An ordered sequence of pose samples. Index order is time order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<PoseSample>,
}

impl Trajectory {
    #[must_use]
    pub fn new(samples: Vec<PoseSample>) -> Self {
        Self { samples }
    }

    #[must_use]
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = [f64; SAMPLE_FIELDS]>,
    {
        Self::new(rows.into_iter().map(PoseSample::from_row).collect())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn samples(&self) -> &[PoseSample] {
        &self.samples
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PoseSample> {
        self.samples.get(index)
    }

    /// Sample positions in time order.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = DVec3> + '_ {
        self.samples.iter().map(|s| s.position)
    }
}

impl FromIterator<PoseSample> for Trajectory {
    fn from_iter<I: IntoIterator<Item = PoseSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// All trajectories read from a single source, shaped
/// `[trajectory_count, sample_count, 6]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrajectorySet {
    trajectories: Vec<Trajectory>,
}

impl TrajectorySet {
    #[must_use]
    pub fn new(trajectories: Vec<Trajectory>) -> Self {
        Self { trajectories }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trajectory> {
        self.trajectories.iter()
    }

    /// Borrows the trajectory at `index`.
    pub fn get(&self, index: usize) -> Result<&Trajectory> {
        self.trajectories
            .get(index)
            .ok_or(AirshipError::TrajectoryIndexOutOfBounds {
                index,
                count: self.trajectories.len(),
            })
    }

    /// Clones the trajectory at `index` out of the set.
    pub fn select(&self, index: usize) -> Result<Trajectory> {
        self.get(index).cloned()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Trajectory> {
        self.trajectories
    }
}

impl From<Vec<Trajectory>> for TrajectorySet {
    fn from(trajectories: Vec<Trajectory>) -> Self {
        Self::new(trajectories)
    }
}

impl<'a> IntoIterator for &'a TrajectorySet {
    type Item = &'a Trajectory;
    type IntoIter = std::slice::Iter<'a, Trajectory>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
