//! Boundary traits between the animator and a host scene.
//!
//! The animator never reaches for a global scene: everything it touches
//! goes through a [`SceneAdapter`] passed in by the caller.
//! [`Scene`](crate::scene::Scene) is the in-memory implementation used by the demo
//! app and the tests; a host integration implements the same trait over its
//! own object handles.

use glam::DVec3;

use crate::errors::Result;
use crate::scene::constraint::{TrackAxis, UpAxis};
use crate::trajectory::{OrientedFrame, Orientation};

/// Operations the animator needs from a host scene.
pub trait SceneAdapter {
    /// Host-side object handle.
    type Handle: Copy + Eq + std::fmt::Debug;

    fn find_object(&self, name: &str) -> Option<Self::Handle>;

    /// Returns the object named `name`, creating a camera there with the
    /// given spawn transform when absent.
    fn get_or_create_camera(
        &mut self,
        name: &str,
        location: DVec3,
        rotation_euler: DVec3,
    ) -> Self::Handle;

    /// Adds a track-to constraint unless `camera` already has one.
    ///
    /// Returns `true` when a constraint was added.
    fn add_track_to_constraint(
        &mut self,
        camera: Self::Handle,
        target: Self::Handle,
        track_axis: TrackAxis,
        up_axis: UpAxis,
    ) -> Result<bool>;

    fn set_frame_range(&mut self, start: i64, end: i64);

    /// Creates a polyline curve object through `points`.
    fn create_path_curve(&mut self, name: &str, points: &[DVec3]) -> Self::Handle;

    /// Sets and keys location and rotation of `object` at `frame`.
    fn set_pose(
        &mut self,
        object: Self::Handle,
        frame: i64,
        position: DVec3,
        orientation: Orientation,
    ) -> Result<()>;

    /// Sets and keys only the location of `object` at `frame`.
    fn set_location(&mut self, object: Self::Handle, frame: i64, position: DVec3) -> Result<()>;
}

/// A sink for solved poses.
pub trait AnimationTarget {
    fn set_pose(&mut self, frame: i64, position: DVec3, orientation: Orientation) -> Result<()>;
}

/// One object of a [`SceneAdapter`] viewed as an [`AnimationTarget`].
pub struct TargetHandle<'a, S: SceneAdapter> {
    scene: &'a mut S,
    handle: S::Handle,
}

impl<'a, S: SceneAdapter> TargetHandle<'a, S> {
    #[must_use]
    pub fn new(scene: &'a mut S, handle: S::Handle) -> Self {
        Self { scene, handle }
    }

    #[inline]
    #[must_use]
    pub fn handle(&self) -> S::Handle {
        self.handle
    }
}

impl<S: SceneAdapter> AnimationTarget for TargetHandle<'_, S> {
    fn set_pose(&mut self, frame: i64, position: DVec3, orientation: Orientation) -> Result<()> {
        self.scene.set_pose(self.handle, frame, position, orientation)
    }
}

/// Applies every frame to `target` in order, returning the count applied.
pub fn apply_frames<T, I>(target: &mut T, frames: I) -> Result<usize>
where
    T: AnimationTarget + ?Sized,
    I: IntoIterator<Item = OrientedFrame>,
{
    let mut applied = 0;
    for frame in frames {
        target.set_pose(frame.frame, frame.position, frame.orientation)?;
        applied += 1;
    }
    Ok(applied)
}
