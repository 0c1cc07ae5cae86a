use glam::{DQuat, DVec3};
use rustc_hash::FxHashMap;
use serde::Serialize;
use slotmap::SlotMap;

use crate::errors::{AirshipError, Result};
use crate::scene::ObjectKey;
use crate::scene::adapter::SceneAdapter;
use crate::scene::constraint::{Constraint, TrackAxis, TrackToConstraint, UpAxis};
use crate::scene::object::{ObjectKind, SceneObject};
use crate::scene::transform::Transform;
use crate::trajectory::Orientation;

/// Location and rotation of an object after tracks and constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatedPose {
    pub position: DVec3,
    pub rotation: DQuat,
}

/// In-memory scene.
///
/// Objects live in a slot map and are also indexed by unique name. Adding
/// an object whose name is taken appends a `.001`-style suffix.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scene {
    objects: SlotMap<ObjectKey, SceneObject>,
    #[serde(skip)]
    names: FxHashMap<String, ObjectKey>,

    pub frame_start: i64,
    pub frame_end: i64,
    pub active_camera: Option<ObjectKey>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Object management
    // ========================================================================

    /// Adds `object`, renaming it if its name is already in use.
    pub fn add_object(&mut self, mut object: SceneObject) -> ObjectKey {
        object.name = self.unique_name(&object.name);
        let name = object.name.clone();
        let key = self.objects.insert(object);
        self.names.insert(name, key);
        key
    }

    pub fn add_mesh(&mut self, name: &str) -> ObjectKey {
        self.add_object(SceneObject::new(name, ObjectKind::Mesh))
    }

    pub fn add_camera(&mut self, name: &str, transform: Transform) -> ObjectKey {
        let key = self.add_object(SceneObject::new(name, ObjectKind::Camera).with_transform(transform));
        if self.active_camera.is_none() {
            self.active_camera = Some(key);
        }
        key
    }

    pub fn remove_object(&mut self, key: ObjectKey) -> Option<SceneObject> {
        let object = self.objects.remove(key)?;
        self.names.remove(&object.name);
        if self.active_camera == Some(key) {
            self.active_camera = None;
        }
        Some(object)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ObjectKey> {
        self.names.get(name).copied()
    }

    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.find_by_name(name).and_then(|key| self.objects.get(key))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.objects.iter()
    }

    #[must_use]
    pub fn frame_range(&self) -> (i64, i64) {
        (self.frame_start, self.frame_end)
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Evaluates `key` at `frame`, applying its track-to constraint if any.
    ///
    /// A constraint that cannot produce an aim (target missing, coincident
    /// or straight above/below) leaves the keyed rotation in place.
    #[must_use]
    pub fn evaluate(&self, key: ObjectKey, frame: f64) -> Option<EvaluatedPose> {
        let object = self.objects.get(key)?;
        let position = object.location_at(frame);
        let euler = object.rotation_euler_at(frame);
        let mut rotation = Transform::new(position, euler).rotation();

        if let Some(track_to) = object.track_to() {
            let aim = self
                .objects
                .get(track_to.target)
                .and_then(|target| track_to.aim_rotation(position, target.location_at(frame)));
            if let Some(aim) = aim {
                rotation = aim;
            }
        }

        Some(EvaluatedPose { position, rotation })
    }

    fn unique_name(&self, base: &str) -> String {
        if !self.names.contains_key(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| !self.names.contains_key(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    fn object_mut(&mut self, key: ObjectKey) -> Result<&mut SceneObject> {
        self.objects
            .get_mut(key)
            .ok_or_else(|| AirshipError::TargetNotFound(format!("{key:?}")))
    }
}

impl SceneAdapter for Scene {
    type Handle = ObjectKey;

    fn find_object(&self, name: &str) -> Option<ObjectKey> {
        self.find_by_name(name)
    }

    fn get_or_create_camera(&mut self, name: &str, location: DVec3, rotation_euler: DVec3) -> ObjectKey {
        if let Some(key) = self.find_by_name(name) {
            if self.objects.get(key).is_some_and(|object| !object.is_camera()) {
                log::warn!("Object '{name}' is not a camera; using it as the chase camera anyway");
            }
            return key;
        }
        log::debug!("Creating camera '{name}' at {location}");
        self.add_camera(name, Transform::new(location, rotation_euler))
    }

    fn add_track_to_constraint(
        &mut self,
        camera: ObjectKey,
        target: ObjectKey,
        track_axis: TrackAxis,
        up_axis: UpAxis,
    ) -> Result<bool> {
        if !self.objects.contains_key(target) {
            return Err(AirshipError::TargetNotFound(format!("{target:?}")));
        }

        let object = self.object_mut(camera)?;
        if object.track_to().is_some() {
            return Ok(false);
        }
        object
            .constraints
            .push(Constraint::TrackTo(TrackToConstraint::new(target, track_axis, up_axis)));
        Ok(true)
    }

    fn set_frame_range(&mut self, start: i64, end: i64) {
        self.frame_start = start;
        self.frame_end = end;
    }

    fn create_path_curve(&mut self, name: &str, points: &[DVec3]) -> ObjectKey {
        self.add_object(SceneObject::new(
            format!("{name}Object"),
            ObjectKind::Curve {
                points: points.to_vec(),
            },
        ))
    }

    fn set_pose(
        &mut self,
        object: ObjectKey,
        frame: i64,
        position: DVec3,
        orientation: Orientation,
    ) -> Result<()> {
        let object = self.object_mut(object)?;
        object.key_location(frame, position);
        object.key_rotation(frame, orientation.as_euler());
        Ok(())
    }

    fn set_location(&mut self, object: ObjectKey, frame: i64, position: DVec3) -> Result<()> {
        self.object_mut(object)?.key_location(frame, position);
        Ok(())
    }
}
