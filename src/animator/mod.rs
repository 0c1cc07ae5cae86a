//! Animator
//!
//! Drives an airship and its chase camera along one trajectory through a
//! [`SceneAdapter`]:
//!
//! 1. Solve the trajectory and look up the airship (both may fail)
//! 2. Create a polyline preview of the path (optional)
//! 3. Get or create the chase camera and aim it with a track-to constraint
//! 4. Set the scene frame range to cover every sample
//! 5. Key the airship pose and camera location on every frame
//!
//! Step 1 runs before the scene is touched, so invalid input never leaves a
//! partial animation behind.

pub mod config;

pub use config::AnimatorConfig;

use std::ops::Range;

use crate::assets::{TrajectorySource, TrajectorySourceVariant};
use crate::errors::{AirshipError, Result};
use crate::scene::SceneAdapter;
use crate::trajectory::{Trajectory, TrajectoryOrientationSolver};

/// What a run wrote to the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationReport<H> {
    pub airship: H,
    pub camera: H,
    pub path_curve: Option<H>,
    /// Whether this run added the camera's track-to constraint.
    pub constraint_added: bool,
    pub frames: Range<i64>,
}

impl<H> AnimationReport<H> {
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> usize {
        (self.frames.end - self.frames.start).max(0) as usize
    }
}

pub struct AirshipAnimator {
    config: AnimatorConfig,
    solver: TrajectoryOrientationSolver,
}

impl AirshipAnimator {
    #[must_use]
    pub fn new(config: AnimatorConfig) -> Self {
        let solver = TrajectoryOrientationSolver::new(config.solver_config());
        Self { config, solver }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Loads the configured trajectory from `config.trajectory_file`.
    pub fn load_trajectory(&self) -> Result<Trajectory> {
        let source = TrajectorySourceVariant::from_path(&self.config.trajectory_file)?;
        self.select_trajectory(&source)
    }

    /// Loads `source` and picks `config.trajectory_index`.
    pub fn select_trajectory<S: TrajectorySource + ?Sized>(&self, source: &S) -> Result<Trajectory> {
        source.load()?.select(self.config.trajectory_index)
    }

    /// Loads the trajectory from `source` and animates it.
    pub fn run_from_source<A, S>(&self, scene: &mut A, source: &S) -> Result<AnimationReport<A::Handle>>
    where
        A: SceneAdapter,
        S: TrajectorySource + ?Sized,
    {
        let trajectory = self.select_trajectory(source)?;
        self.run(scene, &trajectory)
    }

    /// Animates the airship and camera along `trajectory`.
    pub fn run<A: SceneAdapter>(
        &self,
        scene: &mut A,
        trajectory: &Trajectory,
    ) -> Result<AnimationReport<A::Handle>> {
        let cfg = &self.config;

        // Validate first: every failure happens before the scene changes.
        let frames = self.solver.solve(trajectory, cfg.start_frame)?;
        let airship = scene
            .find_object(&cfg.airship_name)
            .ok_or_else(|| AirshipError::TargetNotFound(cfg.airship_name.clone()))?;

        let path_curve = if cfg.create_path_curve {
            let points: Vec<_> = trajectory.positions().collect();
            Some(scene.create_path_curve(&cfg.path_curve_name, &points))
        } else {
            None
        };

        let camera = scene.get_or_create_camera(
            &cfg.camera_name,
            cfg.camera_spawn_location,
            cfg.camera_spawn_rotation,
        );
        let constraint_added =
            scene.add_track_to_constraint(camera, airship, cfg.track_axis, cfg.up_axis)?;
        if !constraint_added {
            log::debug!("Camera '{}' already tracks a target", cfg.camera_name);
        }

        let range = frames.frame_range();
        scene.set_frame_range(range.start, range.end);

        let rig = cfg.camera_rig();
        for frame in &frames {
            scene.set_pose(airship, frame.frame, frame.position, frame.orientation)?;
            scene.set_location(camera, frame.frame, rig.camera_position(&frame))?;
        }

        log::info!(
            "Animated '{}' over frames {}..{} ({} samples)",
            cfg.airship_name,
            range.start,
            range.end,
            frames.len()
        );

        Ok(AnimationReport {
            airship,
            camera,
            path_curve,
            constraint_added,
            frames: range,
        })
    }
}
