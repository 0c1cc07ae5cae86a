use std::fmt;

use glam::DVec3;
use serde::Serialize;

use crate::trajectory::Trajectory;

/// Quick inspection data for one trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySummary {
    pub sample_count: usize,
    pub start: DVec3,
    pub end: DVec3,
    pub min: DVec3,
    pub max: DVec3,
    /// Sum of the distances between consecutive samples.
    pub path_length: f64,
}

impl TrajectorySummary {
    /// Returns `None` for an empty trajectory.
    #[must_use]
    pub fn from_trajectory(trajectory: &Trajectory) -> Option<Self> {
        let first = trajectory.get(0)?.position;
        let last = trajectory.get(trajectory.len() - 1)?.position;

        let (min, max) = trajectory
            .positions()
            .fold((first, first), |(min, max), p| (min.min(p), max.max(p)));

        let path_length = trajectory
            .samples()
            .windows(2)
            .map(|pair| pair[0].position.distance(pair[1].position))
            .sum();

        Some(Self {
            sample_count: trajectory.len(),
            start: first,
            end: last,
            min,
            max,
            path_length,
        })
    }

    #[inline]
    #[must_use]
    pub fn extent(&self) -> DVec3 {
        self.max - self.min
    }
}

impl fmt::Display for TrajectorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "samples:     {}", self.sample_count)?;
        writeln!(
            f,
            "start:       ({:.3}, {:.3}, {:.3})",
            self.start.x, self.start.y, self.start.z
        )?;
        writeln!(
            f,
            "end:         ({:.3}, {:.3}, {:.3})",
            self.end.x, self.end.y, self.end.z
        )?;
        writeln!(
            f,
            "bounds min:  ({:.3}, {:.3}, {:.3})",
            self.min.x, self.min.y, self.min.z
        )?;
        writeln!(
            f,
            "bounds max:  ({:.3}, {:.3}, {:.3})",
            self.max.x, self.max.y, self.max.z
        )?;
        write!(f, "path length: {:.3}", self.path_length)
    }
}
