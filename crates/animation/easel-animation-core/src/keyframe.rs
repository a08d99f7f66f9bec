//! Keyframes: a shape's authored state at one point in time.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::geometry::check_progress;
use crate::shape::Shape;
use crate::Result;

/// A non-negative time paired with a shape snapshot. Keyframes order by time only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawKeyframe")]
pub struct Keyframe {
    time: f64,
    shape: Shape,
}

/// Wire form of a keyframe, checked by `Keyframe::new` on the way in.
#[derive(Deserialize)]
struct RawKeyframe {
    time: f64,
    shape: Shape,
}

impl TryFrom<RawKeyframe> for Keyframe {
    type Error = AnimationError;

    fn try_from(raw: RawKeyframe) -> Result<Self> {
        Keyframe::new(raw.time, raw.shape)
    }
}

impl Keyframe {
    /// Fails with `InvalidTime` when `time` is negative or not finite.
    pub fn new(time: f64, shape: Shape) -> Result<Self> {
        if !time.is_finite() || time < 0.0 {
            return Err(AnimationError::InvalidTime { time });
        }
        Ok(Self { time, shape })
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn into_shape(self) -> Shape {
        self.shape
    }

    /// Ordering by time alone.
    #[inline]
    pub fn cmp_time(&self, other: &Keyframe) -> Ordering {
        self.time.total_cmp(&other.time)
    }

    /// Shape `progress` of the way from `from` to `to`.
    ///
    /// Fails with `OutOfRange` for progress outside [0, 1] and with
    /// `OrderViolation` when `from` comes after `to`.
    pub fn interpolate_between(from: &Keyframe, to: &Keyframe, progress: f64) -> Result<Shape> {
        check_progress(progress)?;
        if from.time > to.time {
            return Err(AnimationError::OrderViolation {
                from: from.time,
                to: to.time,
            });
        }
        from.shape.interpolate(&to.shape, progress)
    }
}
