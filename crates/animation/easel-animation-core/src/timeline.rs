//! Timeline: the ordered keyframes of one named shape.
//!
//! Model:
//! - Keyframes are kept sorted by time and are unique up to `TIME_EPSILON`;
//!   inserting within epsilon of an existing time replaces that keyframe.
//! - Every keyframe holds the same shape kind as the first one.
//! - A timeline is never empty; the document drops it with its last keyframe.
//!
//! Sampling policy (`sample`):
//! - `t >= last.time` holds the last shape (clamp-to-end).
//! - `t <= first.time` yields nothing (the shape has not appeared yet).
//! - otherwise blend between the latest keyframe strictly before `t` and the
//!   earliest keyframe at or after `t`.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::TIME_EPSILON;
use crate::error::AnimationError;
use crate::keyframe::Keyframe;
use crate::shape::{Shape, ShapeKind};
use crate::Result;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawTimeline")]
pub struct Timeline {
    name: String,
    keyframes: Vec<Keyframe>,
}

#[derive(Deserialize)]
struct RawTimeline {
    name: String,
    keyframes: Vec<Keyframe>,
}

impl TryFrom<RawTimeline> for Timeline {
    type Error = AnimationError;

    /// Rejects empty, unsorted (or epsilon-colliding) and mixed-kind keyframe lists.
    fn try_from(raw: RawTimeline) -> Result<Self> {
        let first = raw
            .keyframes
            .first()
            .ok_or_else(|| AnimationError::SerializationError {
                reason: format!("timeline '{}' has no keyframes", raw.name),
            })?;
        let expected = first.shape().kind();
        if let Some(other) = raw.keyframes.iter().find(|k| k.shape().kind() != expected) {
            return Err(AnimationError::TypeConflict {
                name: raw.name,
                expected,
                actual: other.shape().kind(),
            });
        }
        for w in raw.keyframes.windows(2) {
            if w[1].time() - w[0].time() < TIME_EPSILON {
                return Err(AnimationError::OrderViolation {
                    from: w[0].time(),
                    to: w[1].time(),
                });
            }
        }
        Ok(Self {
            name: raw.name,
            keyframes: raw.keyframes,
        })
    }
}

impl Timeline {
    /// Start a timeline seeded by `first`; its shape kind becomes the timeline's kind.
    pub fn new(name: impl Into<String>, first: Keyframe) -> Self {
        Self {
            name: name.into(),
            keyframes: vec![first],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.first().shape().kind()
    }

    #[inline]
    pub fn first(&self) -> &Keyframe {
        &self.keyframes[0]
    }

    #[inline]
    pub fn last(&self) -> &Keyframe {
        &self.keyframes[self.keyframes.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Always false for a timeline held by a document.
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe> {
        self.keyframes.iter()
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Consecutive keyframe pairs in time order.
    pub fn pairs(&self) -> impl Iterator<Item = (&Keyframe, &Keyframe)> {
        self.keyframes.windows(2).map(|w| (&w[0], &w[1]))
    }

    fn index_near(&self, time: f64) -> Option<usize> {
        self.keyframes
            .iter()
            .position(|k| (k.time() - time).abs() < TIME_EPSILON)
    }

    /// The keyframe within epsilon of `time`, if any.
    pub fn keyframe_at(&self, time: f64) -> Option<&Keyframe> {
        self.index_near(time).map(|i| &self.keyframes[i])
    }

    /// Insert `keyframe`, replacing any keyframe within epsilon of its time.
    /// Returns the replaced keyframe. The timeline is unchanged on error.
    pub fn insert(&mut self, keyframe: Keyframe) -> Result<Option<Keyframe>> {
        let expected = self.kind();
        let actual = keyframe.shape().kind();
        if expected != actual {
            return Err(AnimationError::TypeConflict {
                name: self.name.clone(),
                expected,
                actual,
            });
        }

        if let Some(i) = self.index_near(keyframe.time()) {
            trace!(
                "timeline '{}': replacing keyframe at {}",
                self.name,
                self.keyframes[i].time()
            );
            let replaced = std::mem::replace(&mut self.keyframes[i], keyframe);
            // The replacement may sit up to epsilon away from the old time.
            self.keyframes.sort_by(Keyframe::cmp_time);
            return Ok(Some(replaced));
        }

        let at = self
            .keyframes
            .partition_point(|k| k.time() < keyframe.time());
        self.keyframes.insert(at, keyframe);
        Ok(None)
    }

    /// Remove the keyframe within epsilon of `time`. May leave the timeline empty.
    pub(crate) fn remove_near(&mut self, time: f64) -> Option<Keyframe> {
        self.index_near(time).map(|i| self.keyframes.remove(i))
    }

    /// The shape at `time` under the clamp-to-end / omit-before-start policy.
    pub fn sample(&self, time: f64) -> Result<Option<Shape>> {
        if time < 0.0 || time.is_nan() {
            return Err(AnimationError::InvalidTime { time });
        }
        let last = self.last();
        if time >= last.time() {
            return Ok(Some(last.shape().clone()));
        }
        if time <= self.first().time() {
            return Ok(None);
        }

        // first.time < time < last.time, so both neighbours exist.
        let next_idx = self.keyframes.partition_point(|k| k.time() < time);
        let prev = &self.keyframes[next_idx - 1];
        let next = &self.keyframes[next_idx];
        let progress = (time - prev.time()) / (next.time() - prev.time());
        Keyframe::interpolate_between(prev, next, progress).map(Some)
    }
}
