use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::assets::TrajectorySource;
use crate::errors::{AirshipError, Result};
use crate::trajectory::{SAMPLE_FIELDS, Trajectory, TrajectorySet};

/// Either `[T][S][6]` or a bare `[S][6]` trajectory.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonTrajectories {
    Many(Vec<Vec<[f64; SAMPLE_FIELDS]>>),
    Single(Vec<[f64; SAMPLE_FIELDS]>),
}

/// Reads trajectories stored as nested JSON arrays.
#[derive(Debug, Clone)]
pub struct JsonTrajectorySource {
    path: PathBuf,
}

impl JsonTrajectorySource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrajectorySource for JsonTrajectorySource {
    fn load(&self) -> Result<TrajectorySet> {
        let text = fs::read_to_string(&self.path).map_err(|err| {
            AirshipError::TrajectorySourceUnavailable(format!("{}: {err}", self.path.display()))
        })?;
        decode(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn decode(text: &str) -> Result<TrajectorySet> {
    let trajectories = match serde_json::from_str::<JsonTrajectories>(text)? {
        JsonTrajectories::Many(many) => many.into_iter().map(Trajectory::from_rows).collect(),
        JsonTrajectories::Single(rows) => vec![Trajectory::from_rows(rows)],
    };
    Ok(TrajectorySet::new(trajectories))
}

pub fn encode(set: &TrajectorySet) -> Result<String> {
    let rows: Vec<Vec<[f64; SAMPLE_FIELDS]>> = set
        .iter()
        .map(|t| t.samples().iter().map(|s| s.to_row()).collect())
        .collect();
    Ok(serde_json::to_string(&rows)?)
}
