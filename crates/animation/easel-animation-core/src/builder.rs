//! Incremental, write-only construction of animation documents.
//!
//! Readers drive an `AnimationBuilder` instead of a concrete document type, so
//! the same text input can produce an `AnimationModel` or any other
//! representation a caller implements the trait for.

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_LAYER;
use crate::error::AnimationError;
use crate::geometry::Point;
use crate::model::{AnimationModel, Canvas};
use crate::shape::{Color, Shape, ShapeKind};
use crate::Result;

/// One endpoint of a motion: time plus the full shape state at that time.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyframeParams {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    /// Radians
    #[serde(default)]
    pub angle: f64,
}

impl KeyframeParams {
    pub fn shape(&self, kind: ShapeKind) -> Shape {
        Shape::new(
            kind,
            Point::new(self.x, self.y),
            self.width,
            self.height,
            self.color,
            self.angle,
        )
    }

    /// Parameters describing `shape` at `time`.
    pub fn from_shape(time: f64, shape: &Shape) -> Self {
        let s = shape.state();
        Self {
            time,
            x: s.position.x,
            y: s.position.y,
            width: s.width,
            height: s.height,
            color: s.color,
            angle: s.angle,
        }
    }
}

/// Builder contract shared by every document representation.
pub trait AnimationBuilder {
    type Output;

    /// Canvas origin and size.
    fn set_bounds(&mut self, x: i32, y: i32, width: i32, height: i32) -> &mut Self;

    /// Declare a shape on the default layer. Fails if `name` is already declared
    /// or `type_name` is not a known shape kind.
    fn declare_shape(&mut self, name: &str, type_name: &str) -> Result<&mut Self> {
        self.declare_shape_in_layer(name, type_name, DEFAULT_LAYER)
    }

    /// Declare a shape on `layer`.
    fn declare_shape_in_layer(
        &mut self,
        name: &str,
        type_name: &str,
        layer: &str,
    ) -> Result<&mut Self>;

    /// Declare a layer on top of the existing ones.
    fn declare_layer(&mut self, layer: &str) -> Result<&mut Self>;

    /// One keyframe for a declared shape.
    fn add_keyframe(&mut self, name: &str, keyframe: KeyframeParams) -> Result<&mut Self>;

    /// Two keyframes for a declared shape in one call.
    fn add_motion(
        &mut self,
        name: &str,
        from: KeyframeParams,
        to: KeyframeParams,
    ) -> Result<&mut Self> {
        self.add_keyframe(name, from)?;
        self.add_keyframe(name, to)
    }

    fn build(self) -> Self::Output
    where
        Self: Sized;
}

#[derive(Clone, Debug)]
struct Declaration {
    kind: ShapeKind,
    layer: String,
}

/// Builds an `AnimationModel`.
#[derive(Debug, Default)]
pub struct AnimationModelBuilder {
    model: AnimationModel,
    declared: HashMap<String, Declaration>,
}

impl AnimationModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn declaration(&self, name: &str) -> Result<&Declaration> {
        self.declared
            .get(name)
            .ok_or_else(|| AnimationError::UnknownShape {
                name: name.to_string(),
            })
    }
}

impl AnimationBuilder for AnimationModelBuilder {
    type Output = AnimationModel;

    fn set_bounds(&mut self, x: i32, y: i32, width: i32, height: i32) -> &mut Self {
        self.model.set_canvas(Canvas::new(x, y, width, height));
        self
    }

    fn declare_shape_in_layer(
        &mut self,
        name: &str,
        type_name: &str,
        layer: &str,
    ) -> Result<&mut Self> {
        if self.declared.contains_key(name) {
            return Err(AnimationError::DuplicateShape {
                name: name.to_string(),
            });
        }
        let kind: ShapeKind = type_name.parse()?;
        if !self.model.has_layer(layer) {
            warn!(
                "shape '{}' refers to undeclared layer '{}'; adding it on top",
                name, layer
            );
            self.model.add_layer(layer)?;
        }
        self.declared.insert(
            name.to_string(),
            Declaration {
                kind,
                layer: layer.to_string(),
            },
        );
        Ok(self)
    }

    /// Re-declaring an existing layer raises it to the top of the stack.
    fn declare_layer(&mut self, layer: &str) -> Result<&mut Self> {
        if self.model.has_layer(layer) {
            self.model.raise_layer_to_top(layer)?;
        } else {
            self.model.add_layer(layer)?;
        }
        Ok(self)
    }

    fn add_keyframe(&mut self, name: &str, keyframe: KeyframeParams) -> Result<&mut Self> {
        let decl = self.declaration(name)?.clone();
        let shape = keyframe.shape(decl.kind);
        self.model
            .create_keyframe_in_layer(name, shape, keyframe.time, &decl.layer)?;
        Ok(self)
    }

    fn build(self) -> AnimationModel {
        self.model
    }
}
