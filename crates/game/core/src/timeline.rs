//! Time-keyed lookup tables.
//!
//! [`Timeline`] interpolates between keys and is used for sampled paths.
//! [`SteppedTimeline`] holds each key until the next one and is used for
//! scripted maneuvers and planner output, where blending two control intents
//! makes no sense.

use crate::error::TimelineError;
use crate::math::Lerp;

fn check_order(last: Option<f64>, time: f64) -> Result<(), TimelineError> {
    match last {
        Some(last) if time < last => Err(TimelineError::OutOfOrder { time, last }),
        _ => Ok(()),
    }
}

/// Values keyed by nondecreasing time, interpolated in between.
///
/// Queries before the first key return the first value, queries after the
/// last key return the last value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline<T> {
    keys: Vec<(f64, T)>,
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
        }
    }

    /// Appends a key.
    ///
    /// # Errors
    ///
    /// [`TimelineError::OutOfOrder`] if `time` is earlier than the last key.
    pub fn push(&mut self, time: f64, value: T) -> Result<(), TimelineError> {
        check_order(self.last_time(), time)?;
        self.keys.push((time, value));
        Ok(())
    }

    /// Appends a key the caller knows to be in order.
    pub(crate) fn push_sorted(&mut self, time: f64, value: T) {
        debug_assert!(self.last_time().is_none_or(|last| last <= time));
        self.keys.push((time, value));
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn first_time(&self) -> Option<f64> {
        self.keys.first().map(|(time, _)| *time)
    }

    pub fn last_time(&self) -> Option<f64> {
        self.keys.last().map(|(time, _)| *time)
    }

    pub fn keys(&self) -> &[(f64, T)] {
        &self.keys
    }
}

impl<T: Lerp> Timeline<T> {
    /// Value at `time`, interpolated between the surrounding keys.
    ///
    /// Returns `None` only for an empty timeline.
    pub fn evaluate(&self, time: f64) -> Option<T> {
        let next = self.keys.partition_point(|(key, _)| *key <= time);
        if next == 0 {
            return self.keys.first().map(|(_, value)| value.clone());
        }
        let (t0, v0) = &self.keys[next - 1];
        let Some((t1, v1)) = self.keys.get(next) else {
            return Some(v0.clone());
        };
        let span = t1 - t0;
        if span <= 0.0 {
            return Some(v1.clone());
        }
        Some(v0.lerp(v1, (time - t0) / span))
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Values keyed by nondecreasing time, each valid until the next key.
///
/// An end marker pushed with [`push_end`](Self::push_end) makes every query
/// at or after it return `None`, as does any query before the first key.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteppedTimeline<T> {
    keys: Vec<(f64, Option<T>)>,
}

impl<T> SteppedTimeline<T> {
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Appends a key holding `value` from `time` on.
    ///
    /// # Errors
    ///
    /// [`TimelineError::OutOfOrder`] if `time` is earlier than the last key,
    /// [`TimelineError::AlreadyEnded`] if an end marker was pushed.
    pub fn push(&mut self, time: f64, value: T) -> Result<(), TimelineError> {
        self.push_entry(time, Some(value))
    }

    /// Appends the end marker.
    ///
    /// # Errors
    ///
    /// Same as [`push`](Self::push).
    pub fn push_end(&mut self, time: f64) -> Result<(), TimelineError> {
        self.push_entry(time, None)
    }

    fn push_entry(&mut self, time: f64, value: Option<T>) -> Result<(), TimelineError> {
        if let Some(end) = self.end_time() {
            return Err(TimelineError::AlreadyEnded { end });
        }
        check_order(self.last_time(), time)?;
        self.keys.push((time, value));
        Ok(())
    }

    /// Builder form of [`push`](Self::push).
    pub fn then(mut self, time: f64, value: T) -> Result<Self, TimelineError> {
        self.push(time, value)?;
        Ok(self)
    }

    /// Builder form of [`push_end`](Self::push_end).
    pub fn ending_at(mut self, time: f64) -> Result<Self, TimelineError> {
        self.push_end(time)?;
        Ok(self)
    }

    /// Builds a finished timeline from keys given in any order.
    ///
    /// Keys are sorted by time (keeping the given order for equal times) and
    /// keys at or after `end` are dropped.
    pub fn from_steps(steps: impl IntoIterator<Item = (f64, T)>, end: f64) -> Self {
        let mut keys: Vec<(f64, Option<T>)> = steps
            .into_iter()
            .filter(|(time, _)| *time < end)
            .map(|(time, value)| (time, Some(value)))
            .collect();
        keys.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        keys.push((end, None));
        Self { keys }
    }

    /// Keys every `step` seconds starting at 0, one per value, with the end
    /// marker one step after the last value. `step` must be positive.
    pub(crate) fn evenly_spaced(step: f64, values: impl IntoIterator<Item = T>) -> Self {
        debug_assert!(step > 0.0);
        let mut keys: Vec<(f64, Option<T>)> = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| (i as f64 * step, Some(value)))
            .collect();
        keys.push((keys.len() as f64 * step, None));
        Self { keys }
    }

    /// The value of the latest key at or before `time`.
    pub fn evaluate(&self, time: f64) -> Option<&T> {
        let next = self.keys.partition_point(|(key, _)| *key <= time);
        let index = next.checked_sub(1)?;
        self.keys[index].1.as_ref()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Time of the last key, including the end marker.
    pub fn last_time(&self) -> Option<f64> {
        self.keys.last().map(|(time, _)| *time)
    }

    /// Time of the end marker, if one was pushed.
    pub fn end_time(&self) -> Option<f64> {
        match self.keys.last() {
            Some((time, None)) => Some(*time),
            _ => None,
        }
    }

    /// Keys that carry a value, in order.
    pub fn values(&self) -> impl Iterator<Item = (f64, &T)> {
        self.keys
            .iter()
            .filter_map(|(time, value)| value.as_ref().map(|value| (*time, value)))
    }
}

impl<T> Default for SteppedTimeline<T> {
    fn default() -> Self {
        Self::new()
    }
}
