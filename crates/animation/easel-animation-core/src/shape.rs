//! Shape kinds and the tagged shape value carried by every keyframe.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::geometry::{check_progress, lerp, Point};
use crate::Result;

/// An 8-bit RGB color.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise blend, rounded to the nearest integer channel value.
    pub fn interpolate(&self, to: &Color, progress: f64) -> Color {
        Color {
            r: lerp_channel(self.r, to.r, progress),
            g: lerp_channel(self.g, to.g, progress),
            b: lerp_channel(self.b, to.b, progress),
        }
    }
}

#[inline]
fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    lerp(a as f64, b as f64, t).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// The closed set of shape kinds a timeline can hold.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
}

impl ShapeKind {
    /// Name used by the text format.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
        }
    }

    /// Element name used by SVG output.
    pub fn svg_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Ok(ShapeKind::Rectangle),
            "ellipse" => Ok(ShapeKind::Ellipse),
            _ => Err(AnimationError::UnknownShapeKind {
                kind: s.to_string(),
            }),
        }
    }
}

/// Fields shared by every shape kind.
///
/// `position` is the upper-left corner for rectangles and the center for
/// ellipses. `angle` is a rotation in radians about the bounding-box center.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ShapeState {
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    #[serde(default)]
    pub angle: f64,
}

impl ShapeState {
    fn interpolate(&self, to: &ShapeState, progress: f64) -> ShapeState {
        ShapeState {
            position: Point::new(
                lerp(self.position.x, to.position.x, progress),
                lerp(self.position.y, to.position.y, progress),
            ),
            width: lerp(self.width, to.width, progress),
            height: lerp(self.height, to.height, progress),
            color: self.color.interpolate(&to.color, progress),
            angle: lerp(self.angle, to.angle, progress),
        }
    }
}

/// A shape value tagged by kind. Equality and hashing are structural.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "state", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(ShapeState),
    Ellipse(ShapeState),
}

impl Shape {
    /// Build a shape of `kind`. Negative dimensions are clamped to zero.
    pub fn new(
        kind: ShapeKind,
        position: Point,
        width: f64,
        height: f64,
        color: Color,
        angle: f64,
    ) -> Self {
        let state = ShapeState {
            position,
            width: width.max(0.0),
            height: height.max(0.0),
            color,
            angle,
        };
        Self::from_state(kind, state)
    }

    pub fn rectangle(position: Point, width: f64, height: f64, color: Color) -> Self {
        Self::new(ShapeKind::Rectangle, position, width, height, color, 0.0)
    }

    pub fn ellipse(position: Point, width: f64, height: f64, color: Color) -> Self {
        Self::new(ShapeKind::Ellipse, position, width, height, color, 0.0)
    }

    #[inline]
    pub fn from_state(kind: ShapeKind, state: ShapeState) -> Self {
        match kind {
            ShapeKind::Rectangle => Shape::Rectangle(state),
            ShapeKind::Ellipse => Shape::Ellipse(state),
        }
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
        }
    }

    #[inline]
    pub fn state(&self) -> &ShapeState {
        match self {
            Shape::Rectangle(s) | Shape::Ellipse(s) => s,
        }
    }

    #[inline]
    fn state_mut(&mut self) -> &mut ShapeState {
        match self {
            Shape::Rectangle(s) | Shape::Ellipse(s) => s,
        }
    }

    pub fn position(&self) -> Point {
        self.state().position
    }

    pub fn width(&self) -> f64 {
        self.state().width
    }

    pub fn height(&self) -> f64 {
        self.state().height
    }

    pub fn color(&self) -> Color {
        self.state().color
    }

    pub fn angle(&self) -> f64 {
        self.state().angle
    }

    /// Center of the axis-aligned bounding box, in shape coordinates.
    pub fn center(&self) -> Point {
        let s = self.state();
        match self {
            Shape::Rectangle(_) => s.position.offset(s.width / 2.0, s.height / 2.0),
            Shape::Ellipse(_) => s.position,
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.state_mut().position = position;
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        let s = self.state_mut();
        s.width = width.max(0.0);
        s.height = height.max(0.0);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.state_mut().color = color;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.state_mut().angle = angle;
        self
    }

    /// Component-wise linear blend from `self` to `to`.
    ///
    /// Fails with `TypeMismatch` when the kinds differ and with `OutOfRange`
    /// when `progress` is outside [0, 1].
    pub fn interpolate(&self, to: &Shape, progress: f64) -> Result<Shape> {
        if self.kind() != to.kind() {
            return Err(AnimationError::TypeMismatch {
                expected: self.kind(),
                actual: to.kind(),
            });
        }
        check_progress(progress)?;
        let state = self.state().interpolate(to.state(), progress);
        Ok(Shape::from_state(self.kind(), state))
    }
}

#[inline]
fn hash_f64<H: Hasher>(v: f64, state: &mut H) {
    // -0.0 and 0.0 compare equal, so they must hash equal too.
    (v + 0.0).to_bits().hash(state);
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        let s = self.state();
        hash_f64(s.position.x, state);
        hash_f64(s.position.y, state);
        hash_f64(s.width, state);
        hash_f64(s.height, state);
        s.color.hash(state);
        hash_f64(s.angle, state);
    }
}
