use easel_animation_core::{
    parse_animation, parse_model, AnimationBuilder, AnimationError, AnimationView, EditAction,
    KeyframeParams, Result,
};

/// Records builder calls instead of building a document.
#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
}

impl AnimationBuilder for Recorder {
    type Output = Vec<String>;

    fn set_bounds(&mut self, x: i32, y: i32, width: i32, height: i32) -> &mut Self {
        self.calls.push(format!("bounds {x} {y} {width} {height}"));
        self
    }

    fn declare_shape_in_layer(
        &mut self,
        name: &str,
        type_name: &str,
        layer: &str,
    ) -> Result<&mut Self> {
        self.calls.push(format!("shape {name} {type_name} {layer}"));
        Ok(self)
    }

    fn declare_layer(&mut self, layer: &str) -> Result<&mut Self> {
        self.calls.push(format!("layer {layer}"));
        Ok(self)
    }

    fn add_keyframe(&mut self, name: &str, keyframe: KeyframeParams) -> Result<&mut Self> {
        if name == "forbidden" {
            return Err(AnimationError::UnknownShape { name: name.into() });
        }
        self.calls
            .push(format!("keyframe {name} {} {}", keyframe.time, keyframe.color));
        Ok(self)
    }

    fn build(self) -> Vec<String> {
        self.calls
    }
}

#[test]
fn reader_drives_any_builder() {
    let input = "canvas 0 0 10 10\nlayer top\nshape A ellipse\n\
                 motion A 1 0 0 1 1 9 8 7 2 0 0 1 1 0 0 0\n";
    let calls = parse_animation(input, Recorder::default()).unwrap();
    assert_eq!(
        calls,
        vec![
            "bounds 0 0 10 10",
            "layer top",
            "shape A ellipse default",
            "keyframe A 1 rgb(9,8,7)",
            "keyframe A 2 rgb(0,0,0)",
        ]
    );
}

#[test]
fn builder_errors_abort_the_read() {
    let input = "motion forbidden 1 0 0 1 1 0 0 0 2 0 0 1 1 0 0 0\nlayer never\n";
    let err = parse_animation(input, Recorder::default()).unwrap_err();
    assert_eq!(
        err,
        AnimationError::UnknownShape {
            name: "forbidden".into()
        }
    );
}

#[test]
fn edit_actions_apply_to_a_parsed_model() {
    let input = "shape R rectangle\nmotion R 0 0 0 10 10 0 0 0 10 100 0 10 10 0 0 0\n";
    let mut model = parse_model(input).unwrap();
    let actions: Vec<EditAction> = serde_json::from_str(
        r#"[
            {"CreateKeyframe": {"name": "R", "time": 5}},
            {"ChangeY": {"name": "R", "time": 5, "delta": 20}}
        ]"#,
    )
    .unwrap();
    for action in &actions {
        action.apply(&mut model).unwrap();
    }
    let tl = model.timeline("R").unwrap();
    assert_eq!(tl.len(), 3);
    let mid = tl.keyframe_at(5.0).unwrap().shape().position();
    assert_eq!((mid.x, mid.y), (50.0, 20.0));
}
