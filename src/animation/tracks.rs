use serde::Serialize;

use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
}

/// Keys sorted by integer frame number, at most one per frame.
#[derive(Debug, Clone, Serialize)]
pub struct KeyframeTrack<T: Interpolatable> {
    frames: Vec<i64>,
    values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self::new(InterpolationMode::Linear)
    }
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(interpolation: InterpolationMode) -> Self {
        Self {
            frames: Vec::new(),
            values: Vec::new(),
            interpolation,
        }
    }

    /// Inserts or replaces the key at `frame`.
    ///
    /// Returns `true` when the track changed. Re-inserting an identical
    /// key is a no-op.
    pub fn insert(&mut self, frame: i64, value: T) -> bool {
        match self.frames.binary_search(&frame) {
            Ok(index) => {
                if self.values[index] == value {
                    return false;
                }
                self.values[index] = value;
                true
            }
            Err(index) => {
                self.frames.insert(index, frame);
                self.values.insert(index, value);
                true
            }
        }
    }

    /// Removes the key at `frame`, returning its value.
    pub fn remove(&mut self, frame: i64) -> Option<T> {
        let index = self.frames.binary_search(&frame).ok()?;
        self.frames.remove(index);
        Some(self.values.remove(index))
    }

    #[must_use]
    pub fn get(&self, frame: i64) -> Option<T> {
        self.frames
            .binary_search(&frame)
            .ok()
            .map(|index| self.values[index])
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn frames(&self) -> &[i64] {
        &self.frames
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (i64, T)> + '_ {
        self.frames.iter().copied().zip(self.values.iter().copied())
    }

    #[must_use]
    pub fn first_frame(&self) -> Option<i64> {
        self.frames.first().copied()
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<i64> {
        self.frames.last().copied()
    }

    /// Evaluates the track at a (possibly fractional) frame.
    ///
    /// Outside the keyed range the nearest end key is held. Returns `None`
    /// for an empty track.
    #[must_use]
    pub fn sample(&self, frame: f64) -> Option<T> {
        if self.frames.is_empty() {
            return None;
        }

        // partition_point finds the first key strictly after `frame`.
        let next_idx = self.frames.partition_point(|&f| (f as f64) <= frame);
        if next_idx == 0 {
            return Some(self.values[0]);
        }

        let index = next_idx - 1;
        if index >= self.frames.len() - 1 {
            return Some(self.values[index]);
        }

        match self.interpolation {
            InterpolationMode::Step => Some(self.values[index]),
            InterpolationMode::Linear => {
                let f0 = self.frames[index] as f64;
                let f1 = self.frames[index + 1] as f64;
                let t = ((frame - f0) / (f1 - f0)).clamp(0.0, 1.0);
                Some(T::interpolate_linear(
                    self.values[index],
                    self.values[index + 1],
                    t,
                ))
            }
        }
    }
}
