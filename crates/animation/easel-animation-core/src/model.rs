//! The animation document: named timelines, canvas bounds and the layer stack.
//!
//! `AnimationView` is the read-only surface handed to exporters and other
//! consumers; `AnimationModel` adds the mutation API.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_CANVAS, DEFAULT_LAYER};
use crate::error::AnimationError;
use crate::keyframe::Keyframe;
use crate::layers::LayerStack;
use crate::shape::Shape;
use crate::timeline::Timeline;
use crate::Result;

/// Canvas bounds: origin and size, in whole pixels.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Canvas {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Canvas {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        let (x, y, width, height) = DEFAULT_CANVAS;
        Self::new(x, y, width, height)
    }
}

/// Read-only access to an animation document.
pub trait AnimationView {
    fn canvas(&self) -> Canvas;

    /// All timelines, keyed and iterated by shape name.
    fn timelines(&self) -> &BTreeMap<String, Timeline>;

    /// Interpolated state of every shape visible at `time`, keyed by name.
    fn shapes_at(&self, time: f64) -> Result<BTreeMap<String, Shape>>;

    /// Layer names, bottom to top.
    fn layers(&self) -> Vec<&str>;

    fn shapes_in_layer(&self, layer: &str) -> Result<&[String]>;

    fn layer_of(&self, shape: &str) -> Option<&str>;

    /// Shape names, bottom layer first.
    fn draw_order(&self) -> Vec<&str>;

    fn timeline(&self, name: &str) -> Option<&Timeline> {
        self.timelines().get(name)
    }

    fn contains_shape(&self, name: &str) -> bool {
        self.timelines().contains_key(name)
    }

    fn shape_names(&self) -> Vec<&str> {
        self.timelines().keys().map(|k| k.as_str()).collect()
    }

    /// Time of the latest keyframe in the document, or 1 when there is none.
    fn last_time(&self) -> f64 {
        self.timelines()
            .values()
            .map(|tl| tl.last().time())
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.max(t))))
            .unwrap_or(1.0)
    }

    /// Same snapshot as `shapes_at`, listed in draw order.
    fn shapes_at_in_draw_order(&self, time: f64) -> Result<Vec<(String, Shape)>> {
        let mut snapshot = self.shapes_at(time)?;
        Ok(self
            .draw_order()
            .into_iter()
            .filter_map(|name| snapshot.remove_entry(name))
            .collect())
    }
}

/// Owned animation document.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawAnimationModel")]
pub struct AnimationModel {
    canvas: Canvas,
    timelines: BTreeMap<String, Timeline>,
    layers: LayerStack,
}

#[derive(Deserialize)]
struct RawAnimationModel {
    #[serde(default)]
    canvas: Canvas,
    timelines: BTreeMap<String, Timeline>,
    #[serde(default)]
    layers: LayerStack,
}

impl TryFrom<RawAnimationModel> for AnimationModel {
    type Error = AnimationError;

    /// Timelines and layer membership must describe the same set of shapes.
    fn try_from(raw: RawAnimationModel) -> Result<Self> {
        let mismatch = |reason: String| AnimationError::SerializationError { reason };
        for (name, timeline) in &raw.timelines {
            if name != timeline.name() {
                return Err(mismatch(format!(
                    "timeline '{}' stored under '{}'",
                    timeline.name(),
                    name
                )));
            }
            if raw.layers.layer_of(name).is_none() {
                return Err(mismatch(format!("shape '{name}' has no layer")));
            }
        }
        if let Some(orphan) = raw
            .layers
            .draw_order()
            .find(|s| !raw.timelines.contains_key(*s))
        {
            return Err(mismatch(format!("layer member '{orphan}' has no timeline")));
        }
        Ok(Self {
            canvas: raw.canvas,
            timelines: raw.timelines,
            layers: raw.layers,
        })
    }
}

impl AnimationModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas(canvas: Canvas) -> Self {
        Self {
            canvas,
            ..Self::default()
        }
    }

    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    /// Insert or overwrite (within epsilon) the keyframe for `name` at `time`.
    /// A new name starts a timeline on the default layer.
    ///
    /// Fails with `InvalidTime` for negative times and `TypeConflict` when an
    /// existing timeline holds another shape kind. Nothing changes on failure.
    pub fn create_keyframe(&mut self, name: &str, shape: Shape, time: f64) -> Result<()> {
        let keyframe = Keyframe::new(time, shape)?;
        match self.timelines.get_mut(name) {
            Some(timeline) => {
                timeline.insert(keyframe)?;
            }
            None => {
                debug!(
                    "timeline '{}' started ({} at {})",
                    name,
                    keyframe.shape().kind(),
                    time
                );
                self.layers.assign(name, DEFAULT_LAYER)?;
                self.timelines
                    .insert(name.to_string(), Timeline::new(name, keyframe));
            }
        }
        Ok(())
    }

    /// Like `create_keyframe`, also placing the shape on `layer`.
    pub fn create_keyframe_in_layer(
        &mut self,
        name: &str,
        shape: Shape,
        time: f64,
        layer: &str,
    ) -> Result<()> {
        if !self.layers.contains(layer) {
            return Err(AnimationError::UnknownLayer {
                name: layer.to_string(),
            });
        }
        self.create_keyframe(name, shape, time)?;
        self.layers.assign(name, layer)
    }

    /// Remove the keyframe within epsilon of `time`.
    ///
    /// Returns `Ok(false)` when the shape has no keyframe there, and fails with
    /// `UnknownShape` when there is no such shape. Removing the last keyframe
    /// deletes the shape.
    pub fn remove_keyframe(&mut self, name: &str, time: f64) -> Result<bool> {
        let timeline = self
            .timelines
            .get_mut(name)
            .ok_or_else(|| AnimationError::UnknownShape {
                name: name.to_string(),
            })?;
        if timeline.remove_near(time).is_none() {
            return Ok(false);
        }
        if timeline.is_empty() {
            self.delete_shape(name)?;
        }
        Ok(true)
    }

    /// Remove a shape's entire timeline.
    pub fn delete_shape(&mut self, name: &str) -> Result<Timeline> {
        let timeline = self
            .timelines
            .remove(name)
            .ok_or_else(|| AnimationError::UnknownShape {
                name: name.to_string(),
            })?;
        self.layers.unassign(name);
        debug!("shape '{}' deleted", name);
        Ok(timeline)
    }

    pub fn add_layer(&mut self, layer: &str) -> Result<()> {
        self.layers.add(layer)
    }

    /// Delete a layer together with all of its shapes.
    pub fn delete_layer(&mut self, layer: &str) -> Result<()> {
        for shape in self.layers.remove(layer)? {
            self.timelines.remove(&shape);
        }
        Ok(())
    }

    pub fn move_layer_up(&mut self, layer: &str) -> Result<()> {
        self.layers.move_up(layer)
    }

    pub fn move_layer_down(&mut self, layer: &str) -> Result<()> {
        self.layers.move_down(layer)
    }

    pub fn raise_layer_to_top(&mut self, layer: &str) -> Result<()> {
        self.layers.raise_to_top(layer)
    }

    /// Move an existing shape onto another existing layer.
    pub fn set_shape_layer(&mut self, shape: &str, layer: &str) -> Result<()> {
        if !self.timelines.contains_key(shape) {
            return Err(AnimationError::UnknownShape {
                name: shape.to_string(),
            });
        }
        self.layers.assign(shape, layer)
    }

    pub fn has_layer(&self, layer: &str) -> bool {
        self.layers.contains(layer)
    }
}

impl AnimationView for AnimationModel {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn timelines(&self) -> &BTreeMap<String, Timeline> {
        &self.timelines
    }

    fn shapes_at(&self, time: f64) -> Result<BTreeMap<String, Shape>> {
        if time < 0.0 || time.is_nan() {
            return Err(AnimationError::InvalidTime { time });
        }
        let mut shapes = BTreeMap::new();
        for (name, timeline) in &self.timelines {
            if let Some(shape) = timeline.sample(time)? {
                shapes.insert(name.clone(), shape);
            }
        }
        Ok(shapes)
    }

    fn layers(&self) -> Vec<&str> {
        self.layers.names().collect()
    }

    fn shapes_in_layer(&self, layer: &str) -> Result<&[String]> {
        self.layers.shapes_in(layer)
    }

    fn layer_of(&self, shape: &str) -> Option<&str> {
        self.layers.layer_of(shape)
    }

    fn draw_order(&self) -> Vec<&str> {
        self.layers.draw_order().collect()
    }
}
