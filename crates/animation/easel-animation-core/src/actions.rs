//! Edit actions: serializable requests that each perform one model mutation.
//!
//! Editors build these from user input and hand them to `EditAction::apply`.
//! Modifier actions read the interpolated state of a shape at `time`, change
//! one field and write the result back as a keyframe at that time. Angles are
//! kept in [0, 2π).

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::geometry::{normalize_angle, Point};
use crate::model::{AnimationModel, AnimationView};
use crate::shape::{Color, Shape, ShapeKind};
use crate::Result;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum EditAction {
    CreateShape {
        name: String,
        kind: ShapeKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        #[serde(default)]
        angle: f64,
        time: f64,
    },
    CreateKeyframe {
        name: String,
        time: f64,
    },
    RemoveKeyframe {
        name: String,
        time: f64,
    },
    DeleteShape {
        name: String,
    },
    ChangeX {
        name: String,
        time: f64,
        delta: f64,
    },
    ChangeY {
        name: String,
        time: f64,
        delta: f64,
    },
    ChangeWidth {
        name: String,
        time: f64,
        delta: f64,
    },
    ChangeHeight {
        name: String,
        time: f64,
        delta: f64,
    },
    ChangeAngle {
        name: String,
        time: f64,
        delta: f64,
    },
    ChangeColor {
        name: String,
        time: f64,
        color: Color,
    },
}

impl EditAction {
    /// Name of the shape this action targets.
    pub fn shape_name(&self) -> &str {
        match self {
            EditAction::CreateShape { name, .. }
            | EditAction::CreateKeyframe { name, .. }
            | EditAction::RemoveKeyframe { name, .. }
            | EditAction::DeleteShape { name }
            | EditAction::ChangeX { name, .. }
            | EditAction::ChangeY { name, .. }
            | EditAction::ChangeWidth { name, .. }
            | EditAction::ChangeHeight { name, .. }
            | EditAction::ChangeAngle { name, .. }
            | EditAction::ChangeColor { name, .. } => name.as_str(),
        }
    }

    /// Apply to `model`. On error the model is left as it was.
    pub fn apply(&self, model: &mut AnimationModel) -> Result<()> {
        debug!("apply {:?}", self);
        match self {
            EditAction::CreateShape {
                name,
                kind,
                x,
                y,
                width,
                height,
                color,
                angle,
                time,
            } => {
                if model.contains_shape(name) {
                    return Err(AnimationError::DuplicateShape { name: name.clone() });
                }
                let position = Point::new(*x, *y);
                let angle = normalize_angle(*angle);
                let shape = Shape::new(*kind, position, *width, *height, *color, angle);
                model.create_keyframe(name, shape, *time)
            }
            EditAction::CreateKeyframe { name, time } => {
                let shape = visible_shape(model, name, *time)?;
                model.create_keyframe(name, shape, *time)
            }
            EditAction::RemoveKeyframe { name, time } => {
                model.remove_keyframe(name, *time).map(|_| ())
            }
            EditAction::DeleteShape { name } => model.delete_shape(name).map(|_| ()),
            EditAction::ChangeX { name, time, delta } => modify(model, name, *time, |s| {
                let p = s.position();
                s.with_position(Point::new(p.x + delta, p.y))
            }),
            EditAction::ChangeY { name, time, delta } => modify(model, name, *time, |s| {
                let p = s.position();
                s.with_position(Point::new(p.x, p.y + delta))
            }),
            EditAction::ChangeWidth { name, time, delta } => modify(model, name, *time, |s| {
                let h = s.height();
                let w = s.width() + delta;
                s.with_size(w, h)
            }),
            EditAction::ChangeHeight { name, time, delta } => modify(model, name, *time, |s| {
                let w = s.width();
                let h = s.height() + delta;
                s.with_size(w, h)
            }),
            EditAction::ChangeAngle { name, time, delta } => modify(model, name, *time, |s| {
                let a = normalize_angle(s.angle() + delta);
                s.with_angle(a)
            }),
            EditAction::ChangeColor { name, time, color } => {
                modify(model, name, *time, |s| s.with_color(*color))
            }
        }
    }
}

fn visible_shape(model: &AnimationModel, name: &str, time: f64) -> Result<Shape> {
    model
        .shapes_at(time)?
        .remove(name)
        .ok_or_else(|| AnimationError::UnknownShape {
            name: name.to_string(),
        })
}

fn modify(
    model: &mut AnimationModel,
    name: &str,
    time: f64,
    change: impl FnOnce(Shape) -> Shape,
) -> Result<()> {
    let shape = change(visible_shape(model, name, time)?);
    model.create_keyframe(name, shape, time)
}
