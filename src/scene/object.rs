use glam::DVec3;
use serde::Serialize;

use crate::animation::KeyframeTrack;
use crate::scene::constraint::{Constraint, TrackToConstraint};
use crate::scene::transform::Transform;

/// What a scene object represents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObjectKind {
    Empty,
    Mesh,
    Camera,
    /// A 3D polyline through the given points.
    Curve { points: Vec<DVec3> },
}

/// A named object with a transform, keyframe tracks, and constraints.
#[derive(Debug, Clone, Serialize)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub location_track: KeyframeTrack<DVec3>,
    /// XYZ Euler rotation keys.
    pub rotation_track: KeyframeTrack<DVec3>,
    pub constraints: Vec<Constraint>,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::default(),
            location_track: KeyframeTrack::default(),
            rotation_track: KeyframeTrack::default(),
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_camera(&self) -> bool {
        matches!(self.kind, ObjectKind::Camera)
    }

    /// Sets the location and keys it at `frame`.
    pub fn key_location(&mut self, frame: i64, position: DVec3) -> bool {
        self.transform.position = position;
        self.location_track.insert(frame, position)
    }

    /// Sets the Euler rotation and keys it at `frame`.
    pub fn key_rotation(&mut self, frame: i64, rotation_euler: DVec3) -> bool {
        self.transform.rotation_euler = rotation_euler;
        self.rotation_track.insert(frame, rotation_euler)
    }

    pub fn track_to(&self) -> Option<&TrackToConstraint> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::TrackTo(track_to) => Some(track_to),
        })
    }

    /// Animated location at `frame`, or the static location when unkeyed.
    #[must_use]
    pub fn location_at(&self, frame: f64) -> DVec3 {
        self.location_track
            .sample(frame)
            .unwrap_or(self.transform.position)
    }

    /// Animated Euler rotation at `frame`, or the static rotation when unkeyed.
    #[must_use]
    pub fn rotation_euler_at(&self, frame: f64) -> DVec3 {
        self.rotation_track
            .sample(frame)
            .unwrap_or(self.transform.rotation_euler)
    }
}
