//! Animator Tests
//!
//! Tests for:
//! - End-to-end animation of the airship and chase camera on a Scene
//! - Re-running against an already animated scene
//! - Failure cases leaving the scene untouched
//! - AnimatorConfig defaults and JSON overrides

use std::f64::consts::PI;

use glam::DVec3;

use airship::assets::NpyTrajectorySource;
use airship::scene::{ObjectKind, SceneAdapter, TrackAxis, UpAxis};
use airship::{AirshipAnimator, AirshipError, AnimatorConfig, Scene, Trajectory, TrajectorySet};

const EPSILON: f64 = 1e-12;
const CAMERA_OFFSET: DVec3 = DVec3::new(-150.0, -500.0, 65.0);

fn straight_line() -> Trajectory {
    Trajectory::from_rows([
        [0.0, 0.0, 10.0, 0.1, -0.2, 9.0],
        [1.0, 0.0, 10.0, 0.2, -0.1, 9.0],
        [2.0, 0.0, 10.0, 0.3, 0.0, 9.0],
    ])
}

fn scene_with_airship(config: &AnimatorConfig) -> Scene {
    let mut scene = Scene::new();
    scene.add_mesh(&config.airship_name);
    scene
}

// ============================================================================
// Happy Path
// ============================================================================

#[test]
fn run_keys_airship_and_camera() {
    let config = AnimatorConfig {
        start_frame: 1,
        ..AnimatorConfig::default()
    };
    let mut scene = scene_with_airship(&config);
    let animator = AirshipAnimator::new(config);

    let report = animator.run(&mut scene, &straight_line()).unwrap();

    assert_eq!(report.frames, 1..4);
    assert_eq!(report.frame_count(), 3);
    assert!(report.constraint_added);
    assert_eq!(scene.frame_range(), (1, 4));

    let airship = scene.get(report.airship).unwrap();
    assert_eq!(airship.name, "airshipv5");
    assert_eq!(airship.location_track.frames(), &[1, 2, 3]);
    let rotation = airship.rotation_track.get(2).unwrap();
    assert!((rotation.x - 0.2).abs() < EPSILON);
    assert!((rotation.y + 0.1).abs() < EPSILON);
    assert!((rotation.z - PI).abs() < EPSILON, "yaw {}", rotation.z);

    let camera = scene.get(report.camera).unwrap();
    assert!(camera.is_camera());
    assert_eq!(camera.name, "FollowingCamera");
    assert!(camera.rotation_track.is_empty());
    assert_eq!(
        camera.location_track.get(3),
        Some(DVec3::new(2.0, 0.0, 10.0) + CAMERA_OFFSET)
    );

    let track_to = camera.track_to().unwrap();
    assert_eq!(track_to.target, report.airship);
    assert_eq!(track_to.track_axis, TrackAxis::NegativeZ);
    assert_eq!(track_to.up_axis, UpAxis::Y);

    let curve = scene.get(report.path_curve.unwrap()).unwrap();
    assert_eq!(curve.name, "TrajectoryPathObject");
    match &curve.kind {
        ObjectKind::Curve { points } => assert_eq!(points.len(), 3),
        other => panic!("expected a curve, got {other:?}"),
    }
}

#[test]
fn camera_aims_at_airship_every_frame() {
    let config = AnimatorConfig::default();
    let mut scene = scene_with_airship(&config);
    let report = AirshipAnimator::new(config)
        .run(&mut scene, &straight_line())
        .unwrap();

    for frame in report.frames.clone() {
        let camera = scene.evaluate(report.camera, frame as f64).unwrap();
        let airship = scene.evaluate(report.airship, frame as f64).unwrap();
        let view = camera.rotation * DVec3::NEG_Z;
        let expected = (airship.position - camera.position).normalize();
        assert!((view - expected).length() < 1e-9, "frame {frame}");
    }
}

#[test]
fn existing_camera_is_reused_and_not_moved_to_spawn() {
    let config = AnimatorConfig::default();
    let mut scene = scene_with_airship(&config);
    let existing =
        scene.get_or_create_camera(&config.camera_name, DVec3::new(7.0, 7.0, 7.0), DVec3::ZERO);

    let report = AirshipAnimator::new(config)
        .run(&mut scene, &straight_line())
        .unwrap();
    assert_eq!(report.camera, existing);
}

#[test]
fn curve_can_be_skipped() {
    let config = AnimatorConfig {
        create_path_curve: false,
        ..AnimatorConfig::default()
    };
    let mut scene = scene_with_airship(&config);
    let report = AirshipAnimator::new(config)
        .run(&mut scene, &straight_line())
        .unwrap();

    assert!(report.path_curve.is_none());
    assert_eq!(scene.len(), 2);
}

#[test]
fn second_run_replaces_keys() {
    let config = AnimatorConfig::default();
    let mut scene = scene_with_airship(&config);
    let animator = AirshipAnimator::new(config);

    let first = animator.run(&mut scene, &straight_line()).unwrap();
    let second = animator.run(&mut scene, &straight_line()).unwrap();

    assert!(!second.constraint_added);
    assert_eq!(first.camera, second.camera);
    assert_eq!(scene.get(second.camera).unwrap().constraints.len(), 1);
    assert_eq!(scene.get(second.airship).unwrap().location_track.len(), 3);

    let curve = scene.get(second.path_curve.unwrap()).unwrap();
    assert_eq!(curve.name, "TrajectoryPathObject.001");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn missing_airship_leaves_scene_untouched() {
    let mut scene = Scene::new();
    let animator = AirshipAnimator::new(AnimatorConfig::default());

    let result = animator.run(&mut scene, &straight_line());
    assert!(matches!(result, Err(AirshipError::TargetNotFound(name)) if name == "airshipv5"));
    assert!(scene.is_empty());
    assert_eq!(scene.frame_range(), (0, 0));
}

#[test]
fn degenerate_trajectory_leaves_scene_untouched() {
    let config = AnimatorConfig::default();
    let mut scene = scene_with_airship(&config);
    let trajectory = Trajectory::from_rows([
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ]);

    let result = AirshipAnimator::new(config).run(&mut scene, &trajectory);
    assert!(matches!(result, Err(AirshipError::DegenerateTangent { index: 1 })));
    assert_eq!(scene.len(), 1);
    assert!(scene.find_by_name("FollowingCamera").is_none());
}

#[test]
fn single_sample_is_rejected() {
    let config = AnimatorConfig::default();
    let mut scene = scene_with_airship(&config);
    let trajectory = Trajectory::from_rows([[0.0; 6]]);

    let result = AirshipAnimator::new(config).run(&mut scene, &trajectory);
    assert!(matches!(result, Err(AirshipError::InsufficientSamples { len: 1 })));
}

#[test]
fn run_from_source_checks_index() {
    let config = AnimatorConfig {
        trajectory_index: 5,
        ..AnimatorConfig::default()
    };
    let mut scene = scene_with_airship(&config);
    let set = TrajectorySet::new(vec![straight_line()]);

    let result = AirshipAnimator::new(config).run_from_source(&mut scene, &set);
    assert!(matches!(
        result,
        Err(AirshipError::TrajectoryIndexOutOfBounds { index: 5, count: 1 })
    ));
    assert_eq!(scene.len(), 1);
}

// ============================================================================
// Loading & Config
// ============================================================================

#[test]
fn load_configured_trajectory_from_npy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trajectories.npy");
    let set = TrajectorySet::new(vec![
        Trajectory::from_rows([[0.0; 6], [0.0, 1.0, 0.0, 0.0, 0.0, 0.0]]),
        straight_line(),
    ]);
    NpyTrajectorySource::save(&path, &set).unwrap();

    let config = AnimatorConfig {
        trajectory_file: path,
        trajectory_index: 1,
        ..AnimatorConfig::default()
    };
    let animator = AirshipAnimator::new(config);
    assert_eq!(animator.load_trajectory().unwrap(), straight_line());
}

#[test]
fn partial_json_config_uses_defaults() {
    let config =
        AnimatorConfig::from_json_str(r#"{ "trajectory_index": 4, "start_frame": -10 }"#).unwrap();

    assert_eq!(config.trajectory_index, 4);
    assert_eq!(config.start_frame, -10);
    assert_eq!(config.airship_name, "airshipv5");
    assert_eq!(config.camera_offset, CAMERA_OFFSET);
    assert!((config.yaw_offset - PI).abs() < EPSILON);
    assert!(config.create_path_curve);
}

#[test]
fn config_json_round_trip() {
    let config = AnimatorConfig {
        airship_name: "zeppelin".to_string(),
        track_axis: TrackAxis::NegativeY,
        up_axis: UpAxis::Z,
        ..AnimatorConfig::default()
    };
    let text = config.to_json_string().unwrap();
    assert_eq!(AnimatorConfig::from_json_str(&text).unwrap(), config);
}

#[test]
fn yaw_offset_flows_into_solver() {
    let config = AnimatorConfig {
        yaw_offset: 0.0,
        ..AnimatorConfig::default()
    };
    let mut scene = scene_with_airship(&config);
    let report = AirshipAnimator::new(config)
        .run(&mut scene, &straight_line())
        .unwrap();

    let rotation = scene
        .get(report.airship)
        .unwrap()
        .rotation_track
        .get(0)
        .unwrap();
    assert!(rotation.z.abs() < EPSILON);
}
