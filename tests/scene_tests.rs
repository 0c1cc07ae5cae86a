//! Scene Tests
//!
//! Tests for:
//! - Object naming and lookup
//! - SceneAdapter behaviour of the in-memory scene
//! - Track-to constraint aiming and evaluation
//! - TargetHandle / apply_frames

use glam::{DQuat, DVec3};

use airship::AirshipError;
use airship::scene::{
    AnimationTarget, ObjectKind, Scene, SceneAdapter, TargetHandle, TrackAxis, Transform, UpAxis,
    WORLD_UP, aim_rotation, apply_frames,
};
use airship::trajectory::{Orientation, Trajectory, TrajectoryOrientationSolver};

const EPSILON: f64 = 1e-9;

fn vec3_approx(a: DVec3, b: DVec3) -> bool {
    (a - b).length() < EPSILON
}

// ============================================================================
// Naming & Lookup
// ============================================================================

#[test]
fn duplicate_names_get_numbered_suffixes() {
    let mut scene = Scene::new();
    let a = scene.add_mesh("Ship");
    let b = scene.add_mesh("Ship");
    let c = scene.add_mesh("Ship");

    assert_eq!(scene.get(a).unwrap().name, "Ship");
    assert_eq!(scene.get(b).unwrap().name, "Ship.001");
    assert_eq!(scene.get(c).unwrap().name, "Ship.002");
    assert_eq!(scene.len(), 3);
}

#[test]
fn find_by_name_after_remove() {
    let mut scene = Scene::new();
    let key = scene.add_mesh("Ship");
    assert_eq!(scene.find_by_name("Ship"), Some(key));

    let removed = scene.remove_object(key).unwrap();
    assert_eq!(removed.name, "Ship");
    assert_eq!(scene.find_by_name("Ship"), None);
    assert!(scene.is_empty());

    // Name is free again
    let again = scene.add_mesh("Ship");
    assert_eq!(scene.get(again).unwrap().name, "Ship");
}

#[test]
fn first_camera_becomes_active() {
    let mut scene = Scene::new();
    let first = scene.add_camera("CamA", Transform::default());
    let _second = scene.add_camera("CamB", Transform::default());
    assert_eq!(scene.active_camera, Some(first));

    scene.remove_object(first);
    assert_eq!(scene.active_camera, None);
}

// ============================================================================
// SceneAdapter
// ============================================================================

#[test]
fn get_or_create_camera_creates_once() {
    let mut scene = Scene::new();
    let spawn = DVec3::new(1.0, 2.0, 3.0);
    let rotation = DVec3::new(0.5, 0.0, 0.25);

    let cam = scene.get_or_create_camera("FollowingCamera", spawn, rotation);
    let object = scene.get(cam).unwrap();
    assert!(object.is_camera());
    assert_eq!(object.transform.position, spawn);
    assert_eq!(object.transform.rotation_euler, rotation);

    let again = scene.get_or_create_camera("FollowingCamera", DVec3::ZERO, DVec3::ZERO);
    assert_eq!(cam, again);
    assert_eq!(scene.len(), 1);
    // Existing camera keeps its transform
    assert_eq!(scene.get(cam).unwrap().transform.position, spawn);
}

#[test]
fn get_or_create_camera_reuses_non_camera_by_name() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut scene = Scene::new();
    let ship = scene.add_mesh("Ship");

    // Logs a warning and hands back the mesh rather than creating a camera.
    let cam = scene.get_or_create_camera("Ship", DVec3::ONE, DVec3::ZERO);
    assert_eq!(cam, ship);
    assert!(!scene.get(cam).unwrap().is_camera());
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.active_camera, None);
}

#[test]
fn track_to_constraint_is_added_once() {
    let mut scene = Scene::new();
    let ship = scene.add_mesh("Ship");
    let cam = scene.get_or_create_camera("Cam", DVec3::ZERO, DVec3::ZERO);

    let added = scene
        .add_track_to_constraint(cam, ship, TrackAxis::NegativeZ, UpAxis::Y)
        .unwrap();
    assert!(added);

    let added_again = scene
        .add_track_to_constraint(cam, ship, TrackAxis::NegativeZ, UpAxis::Y)
        .unwrap();
    assert!(!added_again);
    assert_eq!(scene.get(cam).unwrap().constraints.len(), 1);

    let track_to = scene.get(cam).unwrap().track_to().unwrap();
    assert_eq!(track_to.target, ship);
    assert_eq!(track_to.track_axis, TrackAxis::NegativeZ);
    assert_eq!(track_to.up_axis, UpAxis::Y);
}

#[test]
fn track_to_missing_target_fails() {
    let mut scene = Scene::new();
    let ship = scene.add_mesh("Ship");
    let cam = scene.add_camera("Cam", Transform::default());
    scene.remove_object(ship);

    let result = scene.add_track_to_constraint(cam, ship, TrackAxis::NegativeZ, UpAxis::Y);
    assert!(matches!(result, Err(AirshipError::TargetNotFound(_))));
}

#[test]
fn set_pose_keys_location_and_rotation() {
    let mut scene = Scene::new();
    let ship = scene.add_mesh("Ship");
    let orientation = Orientation::new(0.1, 0.2, 0.3);

    scene
        .set_pose(ship, 5, DVec3::new(1.0, 2.0, 3.0), orientation)
        .unwrap();

    let object = scene.get(ship).unwrap();
    assert_eq!(object.location_track.get(5), Some(DVec3::new(1.0, 2.0, 3.0)));
    assert_eq!(object.rotation_track.get(5), Some(DVec3::new(0.1, 0.2, 0.3)));
    assert_eq!(object.transform.position, DVec3::new(1.0, 2.0, 3.0));
}

#[test]
fn set_location_on_removed_object_fails() {
    let mut scene = Scene::new();
    let ship = scene.add_mesh("Ship");
    scene.remove_object(ship);

    let result = scene.set_location(ship, 0, DVec3::ZERO);
    assert!(matches!(result, Err(AirshipError::TargetNotFound(_))));
}

#[test]
fn path_curve_object_name_and_points() {
    let mut scene = Scene::new();
    let points = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0)];
    let curve = scene.create_path_curve("TrajectoryPath", &points);

    let object = scene.get(curve).unwrap();
    assert_eq!(object.name, "TrajectoryPathObject");
    assert_eq!(
        object.kind,
        ObjectKind::Curve {
            points: points.to_vec()
        }
    );
}

#[test]
fn frame_range_is_stored() {
    let mut scene = Scene::new();
    scene.set_frame_range(-3, 7);
    assert_eq!(scene.frame_range(), (-3, 7));
}

// ============================================================================
// Track-To Aiming
// ============================================================================

#[test]
fn camera_looks_down_negative_z_at_target() {
    let rot = aim_rotation(
        DVec3::ZERO,
        DVec3::new(0.0, 10.0, 0.0),
        TrackAxis::NegativeZ,
        UpAxis::Y,
        WORLD_UP,
    )
    .unwrap();

    assert!(vec3_approx(rot * DVec3::NEG_Z, DVec3::Y), "got {}", rot * DVec3::NEG_Z);
    assert!(vec3_approx(rot * DVec3::Y, DVec3::Z));
    assert!(vec3_approx(rot * DVec3::X, DVec3::X));
}

#[test]
fn positive_x_track_with_z_up() {
    let rot = aim_rotation(
        DVec3::ZERO,
        DVec3::new(0.0, -4.0, 0.0),
        TrackAxis::PositiveX,
        UpAxis::Z,
        WORLD_UP,
    )
    .unwrap();

    assert!(vec3_approx(rot * DVec3::X, DVec3::NEG_Y));
    assert!(vec3_approx(rot * DVec3::Z, DVec3::Z));
}

#[test]
fn aim_is_orthonormal_for_oblique_views() {
    let eye = DVec3::new(-150.0, -500.0, 65.0);
    let target = DVec3::new(12.0, 3.0, -40.0);
    let rot = aim_rotation(eye, target, TrackAxis::NegativeZ, UpAxis::Y, WORLD_UP).unwrap();

    assert!(rot.is_normalized());
    let forward = (target - eye).normalize();
    assert!(vec3_approx(rot * DVec3::NEG_Z, forward));
    // Local up stays in the vertical plane through the view direction
    let up = rot * DVec3::Y;
    assert!(up.dot(forward).abs() < EPSILON);
    assert!(up.z > 0.0);
}

#[test]
fn aim_degenerate_cases() {
    // Same axis for tracking and up
    assert!(aim_rotation(DVec3::ZERO, DVec3::X, TrackAxis::NegativeY, UpAxis::Y, WORLD_UP).is_none());
    // Coincident eye and target
    assert!(aim_rotation(DVec3::ONE, DVec3::ONE, TrackAxis::NegativeZ, UpAxis::Y, WORLD_UP).is_none());
    // Looking straight down
    assert!(
        aim_rotation(DVec3::Z, DVec3::ZERO, TrackAxis::NegativeZ, UpAxis::Y, WORLD_UP).is_none()
    );
}

#[test]
fn track_axis_vectors() {
    assert_eq!(TrackAxis::NegativeZ.local_vector(), DVec3::NEG_Z);
    assert_eq!(TrackAxis::PositiveY.local_vector(), DVec3::Y);
    assert_eq!(TrackAxis::default(), TrackAxis::NegativeZ);
    assert_eq!(UpAxis::default(), UpAxis::Y);
}

// ============================================================================
// Evaluation
// ============================================================================

#[test]
fn evaluate_applies_track_to_over_keyed_rotation() {
    let mut scene = Scene::new();
    let ship = scene.add_mesh("Ship");
    scene
        .set_location(ship, 0, DVec3::new(0.0, 10.0, 0.0))
        .unwrap();

    let cam = scene.get_or_create_camera("Cam", DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0));
    scene
        .add_track_to_constraint(cam, ship, TrackAxis::NegativeZ, UpAxis::Y)
        .unwrap();

    let pose = scene.evaluate(cam, 0.0).unwrap();
    assert!(vec3_approx(pose.position, DVec3::ZERO));
    assert!(vec3_approx(pose.rotation * DVec3::NEG_Z, DVec3::Y));
}

#[test]
fn evaluate_interpolates_between_keys() {
    let mut scene = Scene::new();
    let ship = scene.add_mesh("Ship");
    scene.set_location(ship, 0, DVec3::ZERO).unwrap();
    scene.set_location(ship, 10, DVec3::new(10.0, 0.0, 0.0)).unwrap();

    let pose = scene.evaluate(ship, 2.5).unwrap();
    assert!(vec3_approx(pose.position, DVec3::new(2.5, 0.0, 0.0)));
    assert!(pose.rotation.abs_diff_eq(DQuat::IDENTITY, EPSILON));
}

#[test]
fn evaluate_degenerate_aim_keeps_keyed_rotation() {
    let mut scene = Scene::new();
    let ship = scene.add_mesh("Ship");
    let cam = scene.add_camera("Cam", Transform::default());
    scene
        .add_track_to_constraint(cam, ship, TrackAxis::NegativeZ, UpAxis::Y)
        .unwrap();

    // Camera and ship both at the origin
    let pose = scene.evaluate(cam, 0.0).unwrap();
    assert!(pose.rotation.abs_diff_eq(DQuat::IDENTITY, EPSILON));
}

// ============================================================================
// AnimationTarget
// ============================================================================

#[test]
fn apply_frames_through_target_handle() {
    let trajectory = Trajectory::from_rows([
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ]);
    let frames = TrajectoryOrientationSolver::default()
        .solve(&trajectory, 100)
        .unwrap();

    let mut scene = Scene::new();
    let ship = scene.add_mesh("Ship");
    let mut target = TargetHandle::new(&mut scene, ship);
    assert_eq!(target.handle(), ship);

    let applied = apply_frames(&mut target, frames).unwrap();
    assert_eq!(applied, 3);

    let object = scene.get(ship).unwrap();
    assert_eq!(object.location_track.frames(), &[100, 101, 102]);
    assert_eq!(object.location_track.get(102), Some(DVec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn animation_target_can_be_custom() {
    #[derive(Default)]
    struct Recorder(Vec<i64>);

    impl AnimationTarget for Recorder {
        fn set_pose(
            &mut self,
            frame: i64,
            _position: DVec3,
            _orientation: Orientation,
        ) -> airship::Result<()> {
            self.0.push(frame);
            Ok(())
        }
    }

    let trajectory = Trajectory::from_rows([
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
    ]);
    let frames = TrajectoryOrientationSolver::default()
        .solve(&trajectory, -1)
        .unwrap();

    let mut recorder = Recorder::default();
    apply_frames(&mut recorder, frames).unwrap();
    assert_eq!(recorder.0, vec![-1, 0]);
}
