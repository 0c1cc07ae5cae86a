//! Trajectory Sources
//!
//! Loading is the caller's job: the solver only ever sees an in-memory
//! [`Trajectory`](crate::trajectory::Trajectory). This module provides the
//! readers for the on-disk formats.
//!
//! # Supported Formats
//!
//! - `.npy`: NumPy arrays shaped `(trajectory_count, sample_count, 6)`
//! - `.json`: the same shape as nested arrays
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use airship::assets::{TrajectorySource, TrajectorySourceVariant};
//!
//! let source = TrajectorySourceVariant::from_path("trajectories.npy")?;
//! let trajectory = source.load()?.select(4)?;
//! ```

pub mod json;
pub mod npy;

pub use json::JsonTrajectorySource;
pub use npy::{NpyDtype, NpyHeader, NpyTrajectorySource};

use std::path::Path;

use crate::errors::{AirshipError, Result};
use crate::trajectory::TrajectorySet;

/// Anything that can produce a [`TrajectorySet`].
pub trait TrajectorySource {
    fn load(&self) -> Result<TrajectorySet>;

    /// Human-readable origin for log messages.
    fn describe(&self) -> String {
        String::from("<trajectory source>")
    }
}

impl TrajectorySource for TrajectorySet {
    fn load(&self) -> Result<TrajectorySet> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("<{} in-memory trajectories>", self.len())
    }
}

/// File-backed sources, chosen by extension.
///
/// An enum rather than a trait object: the set of formats is closed.
#[derive(Debug, Clone)]
pub enum TrajectorySourceVariant {
    Npy(NpyTrajectorySource),
    Json(JsonTrajectorySource),
}

impl TrajectorySourceVariant {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("npy") => Ok(Self::Npy(NpyTrajectorySource::new(path))),
            Some("json") => Ok(Self::Json(JsonTrajectorySource::new(path))),
            _ => Err(AirshipError::TrajectorySourceUnavailable(format!(
                "{}: unsupported file extension (expected .npy or .json)",
                path.display()
            ))),
        }
    }
}

impl TrajectorySource for TrajectorySourceVariant {
    fn load(&self) -> Result<TrajectorySet> {
        let set = match self {
            Self::Npy(source) => source.load()?,
            Self::Json(source) => source.load()?,
        };
        log::info!("Loaded {} trajectories from {}", set.len(), self.describe());
        Ok(set)
    }

    fn describe(&self) -> String {
        match self {
            Self::Npy(source) => source.describe(),
            Self::Json(source) => source.describe(),
        }
    }
}

/// Loads every trajectory from the file at `path`.
pub fn load_trajectories(path: impl AsRef<Path>) -> Result<TrajectorySet> {
    TrajectorySourceVariant::from_path(path)?.load()
}
