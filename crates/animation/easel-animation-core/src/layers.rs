//! Ordered layer stack and shape membership.
//!
//! Layers are stored bottom to top: shapes on later layers are drawn over
//! shapes on earlier ones. Within a layer shapes draw in name order, the same
//! order the text format lists them in. The `default` layer always exists.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_LAYER;
use crate::error::AnimationError;
use crate::Result;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
struct Layer {
    name: String,
    shapes: Vec<String>,
}

impl Layer {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shapes: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawLayerStack")]
pub struct LayerStack {
    layers: Vec<Layer>,
}

#[derive(Deserialize)]
struct RawLayerStack {
    layers: Vec<Layer>,
}

impl TryFrom<RawLayerStack> for LayerStack {
    type Error = AnimationError;

    fn try_from(raw: RawLayerStack) -> Result<Self> {
        let mut stack = LayerStack { layers: Vec::new() };
        for mut layer in raw.layers {
            if stack.contains(&layer.name) {
                return Err(AnimationError::DuplicateLayer { name: layer.name });
            }
            if let Some(shape) = layer.shapes.iter().find(|s| stack.layer_of(s).is_some()) {
                return Err(AnimationError::SerializationError {
                    reason: format!("shape '{shape}' belongs to more than one layer"),
                });
            }
            layer.shapes.sort();
            layer.shapes.dedup();
            stack.layers.push(layer);
        }
        if !stack.contains(DEFAULT_LAYER) {
            return Err(AnimationError::SerializationError {
                reason: format!("layer stack lacks the '{DEFAULT_LAYER}' layer"),
            });
        }
        Ok(stack)
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self {
            layers: vec![Layer::new(DEFAULT_LAYER)],
        }
    }
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.layers
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| AnimationError::UnknownLayer {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.name == name)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false: the default layer cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer names, bottom to top.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.name.as_str())
    }

    /// Push a new layer on top. Adding the default layer is a no-op.
    pub fn add(&mut self, name: &str) -> Result<()> {
        if name == DEFAULT_LAYER {
            return Ok(());
        }
        if self.contains(name) {
            return Err(AnimationError::DuplicateLayer {
                name: name.to_string(),
            });
        }
        debug!("layer '{}' added at z={}", name, self.layers.len());
        self.layers.push(Layer::new(name));
        Ok(())
    }

    /// Remove a layer, returning the shapes it held. The default layer is
    /// emptied but kept.
    pub fn remove(&mut self, name: &str) -> Result<Vec<String>> {
        let idx = self.index_of(name)?;
        if name == DEFAULT_LAYER {
            return Ok(std::mem::take(&mut self.layers[idx].shapes));
        }
        debug!("layer '{}' removed", name);
        Ok(self.layers.remove(idx).shapes)
    }

    /// Move one step toward the top. No-op when already on top.
    pub fn move_up(&mut self, name: &str) -> Result<()> {
        let idx = self.index_of(name)?;
        if idx + 1 < self.layers.len() {
            self.layers.swap(idx, idx + 1);
        }
        Ok(())
    }

    /// Move one step toward the bottom. No-op when already at the bottom.
    pub fn move_down(&mut self, name: &str) -> Result<()> {
        let idx = self.index_of(name)?;
        if idx > 0 {
            self.layers.swap(idx, idx - 1);
        }
        Ok(())
    }

    pub fn raise_to_top(&mut self, name: &str) -> Result<()> {
        let idx = self.index_of(name)?;
        let layer = self.layers.remove(idx);
        self.layers.push(layer);
        Ok(())
    }

    /// Shapes on `name`, in drawing (name) order.
    pub fn shapes_in(&self, name: &str) -> Result<&[String]> {
        let idx = self.index_of(name)?;
        Ok(&self.layers[idx].shapes)
    }

    pub fn layer_of(&self, shape: &str) -> Option<&str> {
        self.layers
            .iter()
            .find(|l| l.shapes.iter().any(|s| s == shape))
            .map(|l| l.name.as_str())
    }

    /// Put `shape` on `layer`, taking it off whichever layer held it before.
    pub fn assign(&mut self, shape: &str, layer: &str) -> Result<()> {
        let idx = self.index_of(layer)?;
        let shapes = &self.layers[idx].shapes;
        let at = match shapes.binary_search_by(|s| s.as_str().cmp(shape)) {
            Ok(_) => return Ok(()),
            Err(at) => at,
        };
        self.unassign(shape);
        self.layers[idx].shapes.insert(at, shape.to_string());
        Ok(())
    }

    pub fn unassign(&mut self, shape: &str) {
        for layer in &mut self.layers {
            layer.shapes.retain(|s| s != shape);
        }
    }

    /// Every shape, bottom layer first, by name within a layer.
    pub fn draw_order(&self) -> impl Iterator<Item = &str> {
        self.layers
            .iter()
            .flat_map(|l| l.shapes.iter().map(|s| s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(stack: &LayerStack) -> Vec<&str> {
        stack.names().collect()
    }

    #[test]
    fn starts_with_default_layer() {
        let stack = LayerStack::new();
        assert_eq!(names(&stack), vec![DEFAULT_LAYER]);
    }

    #[test]
    fn add_pushes_on_top_and_rejects_duplicates() {
        let mut stack = LayerStack::new();
        stack.add("bg").unwrap();
        stack.add("fg").unwrap();
        stack.add(DEFAULT_LAYER).unwrap();
        assert_eq!(names(&stack), vec![DEFAULT_LAYER, "bg", "fg"]);
        assert_eq!(
            stack.add("bg").unwrap_err(),
            AnimationError::DuplicateLayer { name: "bg".into() }
        );
    }

    #[test]
    fn moves_are_clamped_at_the_ends() {
        let mut stack = LayerStack::new();
        stack.add("a").unwrap();
        stack.add("b").unwrap();
        stack.move_up("b").unwrap();
        assert_eq!(names(&stack), vec![DEFAULT_LAYER, "a", "b"]);
        stack.move_down("b").unwrap();
        assert_eq!(names(&stack), vec![DEFAULT_LAYER, "b", "a"]);
        stack.move_down(DEFAULT_LAYER).unwrap();
        assert_eq!(names(&stack), vec![DEFAULT_LAYER, "b", "a"]);
        stack.raise_to_top(DEFAULT_LAYER).unwrap();
        assert_eq!(names(&stack), vec!["b", "a", DEFAULT_LAYER]);
        assert!(matches!(
            stack.move_up("missing"),
            Err(AnimationError::UnknownLayer { .. })
        ));
    }

    #[test]
    fn assign_moves_membership() {
        let mut stack = LayerStack::new();
        stack.add("fg").unwrap();
        stack.assign("R", DEFAULT_LAYER).unwrap();
        stack.assign("C", DEFAULT_LAYER).unwrap();
        stack.assign("R", "fg").unwrap();
        assert_eq!(stack.layer_of("R"), Some("fg"));
        assert_eq!(stack.shapes_in(DEFAULT_LAYER).unwrap(), ["C".to_string()]);
        assert_eq!(stack.draw_order().collect::<Vec<_>>(), vec!["C", "R"]);
    }

    #[test]
    fn removing_default_only_empties_it() {
        let mut stack = LayerStack::new();
        stack.assign("R", DEFAULT_LAYER).unwrap();
        let removed = stack.remove(DEFAULT_LAYER).unwrap();
        assert_eq!(removed, vec!["R".to_string()]);
        assert!(stack.contains(DEFAULT_LAYER));
        assert_eq!(stack.layer_of("R"), None);
    }

    #[test]
    fn shapes_within_a_layer_draw_in_name_order() {
        let mut stack = LayerStack::new();
        stack.assign("Z", DEFAULT_LAYER).unwrap();
        stack.assign("A", DEFAULT_LAYER).unwrap();
        stack.assign("M", DEFAULT_LAYER).unwrap();
        assert_eq!(stack.draw_order().collect::<Vec<_>>(), vec!["A", "M", "Z"]);
    }

    #[test]
    fn deserialization_rejects_inconsistent_stacks() {
        let mut stack = LayerStack::new();
        stack.add("fg").unwrap();
        stack.assign("R", "fg").unwrap();
        let json = serde_json::to_string(&stack).unwrap();
        assert_eq!(serde_json::from_str::<LayerStack>(&json).unwrap(), stack);

        let no_default = r#"{"layers":[{"name":"fg","shapes":[]}]}"#;
        assert!(serde_json::from_str::<LayerStack>(no_default).is_err());

        let shared = r#"{"layers":[{"name":"default","shapes":["R"]},{"name":"fg","shapes":["R"]}]}"#;
        let err = serde_json::from_str::<LayerStack>(shared).unwrap_err();
        assert!(err.to_string().contains("more than one layer"));

        let twice = r#"{"layers":[{"name":"default","shapes":[]},{"name":"default","shapes":[]}]}"#;
        assert!(serde_json::from_str::<LayerStack>(twice).is_err());
    }
}
