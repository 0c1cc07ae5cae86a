//! Trajectory Orientation Solver
//!
//! Converts an ordered list of [`PoseSample`]s into [`OrientedFrame`]s whose
//! yaw follows the direction of travel.
//!
//! # Tangent rule
//!
//! Every sample except the last uses the forward difference
//! `position[i + 1] - position[i]`; the last sample uses the backward
//! difference `position[i] - position[i - 1]`. The first `N - 1` frames
//! therefore look ahead and only the final frame looks back. Keep it
//! one-sided: a centred difference changes every intermediate yaw.
//!
//! # Heading
//!
//! `yaw = atan2(tangent.y, tangent.x) + yaw_offset`. The offset corrects for
//! the asset's forward axis; the default (π) suits a model whose nose points
//! along its local −X. Roll and pitch pass through from the sample.
//!
//! ```rust,ignore
//! let solver = TrajectoryOrientationSolver::default();
//! let frames = solver.solve(&trajectory, 0)?;
//! for frame in &frames {
//!     target.set_pose(frame.frame, frame.position, frame.orientation)?;
//! }
//! ```

use std::f64::consts::PI;
use std::iter::FusedIterator;
use std::ops::Range;

use glam::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

use crate::errors::{AirshipError, Result};
use crate::trajectory::{PoseSample, Trajectory};

/// Yaw correction for assets whose forward axis is reversed relative to
/// the path tangent.
pub const DEFAULT_YAW_OFFSET: f64 = PI;

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Added to the raw tangent heading (radians).
    pub yaw_offset: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            yaw_offset: DEFAULT_YAW_OFFSET,
        }
    }
}

/// Euler orientation applied in XYZ order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Orientation {
    #[must_use]
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// `(roll, pitch, yaw)` as an XYZ Euler vector.
    #[inline]
    #[must_use]
    pub fn as_euler(&self) -> DVec3 {
        DVec3::new(self.roll, self.pitch, self.yaw)
    }

    #[inline]
    #[must_use]
    pub fn from_euler(euler: DVec3) -> Self {
        Self::new(euler.x, euler.y, euler.z)
    }

    #[inline]
    #[must_use]
    pub fn to_quat(&self) -> DQuat {
        DQuat::from_euler(EulerRot::XYZ, self.roll, self.pitch, self.yaw)
    }
}

/// One solved frame. Produced fresh per sample and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedFrame {
    pub frame: i64,
    pub position: DVec3,
    pub orientation: Orientation,
}

/// Raw (unnormalized) tangent at `index` following the one-sided rule.
///
/// Returns `None` when the slice has fewer than two samples or `index` is
/// out of range.
#[must_use]
pub fn tangent_at(samples: &[PoseSample], index: usize) -> Option<DVec3> {
    let len = samples.len();
    if len < 2 || index >= len {
        return None;
    }

    let tangent = if index + 1 < len {
        samples[index + 1].position - samples[index].position
    } else {
        samples[index].position - samples[index - 1].position
    };
    Some(tangent)
}

/// A tangent with no usable direction.
#[inline]
fn is_degenerate(tangent: DVec3) -> bool {
    tangent == DVec3::ZERO || !tangent.is_finite()
}

/// Heading of a tangent in the XY plane plus the asset offset.
///
/// The tangent need not be normalized.
#[inline]
#[must_use]
pub fn heading_from_tangent(tangent: DVec3, yaw_offset: f64) -> f64 {
    tangent.y.atan2(tangent.x) + yaw_offset
}

/// Stateless solver; see the module docs for the algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrajectoryOrientationSolver {
    config: SolverConfig,
}

impl TrajectoryOrientationSolver {
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn with_yaw_offset(yaw_offset: f64) -> Self {
        Self::new(SolverConfig { yaw_offset })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Validates `trajectory` and returns a lazy view over its frames.
    ///
    /// All preconditions are checked here so that iteration never fails:
    /// - fewer than two samples → [`AirshipError::InsufficientSamples`]
    /// - a zero-length or non-finite tangent between adjacent samples →
    ///   [`AirshipError::DegenerateTangent`]
    /// - `start_frame + N` beyond `i64::MAX` → [`AirshipError::FrameRangeOverflow`]
    ///
    /// Checking every adjacent pair covers the backward tangent of the last
    /// sample too, since it reuses the final pair.
    pub fn solve<'a>(
        &self,
        trajectory: &'a Trajectory,
        start_frame: i64,
    ) -> Result<OrientedFrames<'a>> {
        let samples = trajectory.samples();
        if samples.len() < 2 {
            return Err(AirshipError::InsufficientSamples {
                len: samples.len(),
            });
        }

        // Any finite non-zero magnitude has a direction.
        if let Some(index) = samples
            .windows(2)
            .position(|pair| is_degenerate(pair[1].position - pair[0].position))
        {
            return Err(AirshipError::DegenerateTangent { index });
        }

        let len = samples.len();
        if i64::try_from(len)
            .ok()
            .and_then(|n| start_frame.checked_add(n))
            .is_none()
        {
            return Err(AirshipError::FrameRangeOverflow { start_frame, len });
        }

        Ok(OrientedFrames {
            samples,
            start_frame,
            yaw_offset: self.config.yaw_offset,
        })
    }

    /// Eagerly solves into a `Vec`.
    pub fn solve_to_vec(&self, trajectory: &Trajectory, start_frame: i64) -> Result<Vec<OrientedFrame>> {
        Ok(self.solve(trajectory, start_frame)?.iter().collect())
    }
}

/// A validated, restartable view over the solved frames of a trajectory.
///
/// Frames are computed on demand; iterating twice yields identical output.
#[derive(Debug, Clone, Copy)]
pub struct OrientedFrames<'a> {
    samples: &'a [PoseSample],
    start_frame: i64,
    yaw_offset: f64,
}

impl<'a> OrientedFrames<'a> {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`: a solved trajectory has at least two frames.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn start_frame(&self) -> i64 {
        self.start_frame
    }

    /// Half-open range of frame numbers covered, `[start, start + N)`.
    ///
    /// `solve` guarantees the end fits in an `i64`.
    #[must_use]
    pub fn frame_range(&self) -> Range<i64> {
        self.start_frame..self.start_frame + self.samples.len() as i64
    }

    /// Computes the frame for sample `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<OrientedFrame> {
        let sample = self.samples.get(index)?;
        let tangent = tangent_at(self.samples, index)?;

        Some(OrientedFrame {
            frame: self.start_frame + index as i64,
            position: sample.position,
            orientation: Orientation::new(
                sample.roll,
                sample.pitch,
                heading_from_tangent(tangent, self.yaw_offset),
            ),
        })
    }

    #[must_use]
    pub fn iter(&self) -> FrameIter<'a> {
        FrameIter {
            frames: *self,
            front: 0,
            back: self.samples.len(),
        }
    }
}

impl<'a> IntoIterator for OrientedFrames<'a> {
    type Item = OrientedFrame;
    type IntoIter = FrameIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &OrientedFrames<'a> {
    type Item = OrientedFrame;
    type IntoIter = FrameIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [`OrientedFrames`] in increasing frame order.
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    frames: OrientedFrames<'a>,
    front: usize,
    back: usize,
}

impl Iterator for FrameIter<'_> {
    type Item = OrientedFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let frame = self.frames.get(self.front);
        self.front += 1;
        frame
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for FrameIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.frames.get(self.back)
    }
}

impl ExactSizeIterator for FrameIter<'_> {}

impl FusedIterator for FrameIter<'_> {}
