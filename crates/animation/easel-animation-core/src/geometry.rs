//! 2D geometry primitives and scalar interpolation helpers.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::Result;

/// Linear interpolation of scalars. Returns exactly `a` at `t == 0` and
/// exactly `b` at `t == 1`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Reduce an angle in radians into [0, 2π).
///
/// `rem_euclid` rounds tiny negative inputs up to exactly 2π; those wrap to 0.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Fails unless `progress` lies in [0, 1].
#[inline]
pub(crate) fn check_progress(progress: f64) -> Result<()> {
    if (0.0..=1.0).contains(&progress) {
        Ok(())
    } else {
        Err(AnimationError::OutOfRange { progress })
    }
}

/// A position on the canvas. The origin is the top left corner, x grows to the
/// right and y grows downwards.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point `progress` of the way from `self` to `to`.
    pub fn interpolate(&self, to: &Point, progress: f64) -> Result<Point> {
        check_progress(progress)?;
        Ok(Point {
            x: lerp(self.x, to.x, progress),
            y: lerp(self.y, to.y, progress),
        })
    }

    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}
