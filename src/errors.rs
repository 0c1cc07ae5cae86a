//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`AirshipError`] covers all failure modes including:
//! - Trajectory validation (too few samples, degenerate tangents, frame overflow)
//! - Trajectory source loading and decoding errors
//! - Missing scene objects at the adapter boundary
//!
//! Every error is a precondition violation: nothing is retried, and the
//! animator fails before writing any keyframe.
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, AirshipError>`.
//!
//! ```rust,ignore
//! use airship::errors::{AirshipError, Result};
//!
//! fn pick(set: &TrajectorySet) -> Result<Trajectory> {
//!     set.select(4)
//! }
//! ```

use thiserror::Error;

/// The main error type for the airship animator.
#[derive(Error, Debug)]
pub enum AirshipError {
    // ========================================================================
    // Solver Errors
    // ========================================================================
    /// The trajectory has fewer than two samples, so no tangent exists.
    #[error("Trajectory needs at least 2 samples to derive a heading, got {len}")]
    InsufficientSamples {
        /// Number of samples supplied
        len: usize,
    },

    /// Two adjacent samples give a zero-length or non-finite tangent.
    #[error(
        "Degenerate tangent: zero-length or non-finite tangent between samples {index} and {}",
        index + 1
    )]
    DegenerateTangent {
        /// Index of the first sample of the pair
        index: usize,
    },

    /// Frame numbers starting at `start_frame` do not fit in an `i64`.
    #[error("Frame range overflow: {len} frames starting at {start_frame}")]
    FrameRangeOverflow {
        start_frame: i64,
        len: usize,
    },

    // ========================================================================
    // Scene Boundary Errors
    // ========================================================================
    /// A required scene object does not exist.
    #[error("Object '{0}' not found in the scene")]
    TargetNotFound(String),

    // ========================================================================
    // Trajectory Source Errors
    // ========================================================================
    /// The trajectory source could not be opened or read.
    #[error("Trajectory source unavailable: {0}")]
    TrajectorySourceUnavailable(String),

    /// The selected trajectory index is outside the loaded set.
    #[error("Trajectory index out of bounds: {index} (count: {count})")]
    TrajectoryIndexOutOfBounds {
        /// The requested index
        index: usize,
        /// Number of trajectories in the set
        count: usize,
    },

    /// The trajectory data was readable but has an unsupported layout.
    #[error("Malformed trajectory data: {0}")]
    MalformedTrajectory(String),

    // ========================================================================
    // I/O & Format Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, AirshipError>`.
pub type Result<T> = std::result::Result<T, AirshipError>;
