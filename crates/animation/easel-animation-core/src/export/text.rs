//! Canonical text export, matching the reader's grammar.
//!
//! Layout: a `canvas` line, `layer` lines (bottom to top) when the document
//! uses more than the default layer, then every shape in name order as a
//! `shape` line followed by its `motion` lines, shapes separated by a blank
//! line. Motion fields are tab separated, with an empty field between the two
//! endpoints.

use std::fmt::Write as _;

use crate::config::DEFAULT_LAYER;
use crate::export::fmt_num;
use crate::keyframe::Keyframe;
use crate::model::AnimationView;
use crate::timeline::Timeline;

pub fn export_text<V: AnimationView + ?Sized>(view: &V) -> String {
    let mut out = String::new();
    let canvas = view.canvas();
    let _ = writeln!(
        out,
        "canvas {} {} {} {}",
        canvas.x, canvas.y, canvas.width, canvas.height
    );

    let layers = view.layers();
    if layers.len() > 1 {
        for layer in &layers {
            let _ = writeln!(out, "layer {layer}");
        }
    }

    for (name, timeline) in view.timelines() {
        let _ = write!(out, "shape {} {}", name, timeline.kind());
        match view.layer_of(name) {
            Some(layer) if layer != DEFAULT_LAYER => {
                let _ = writeln!(out, " {layer}");
            }
            _ => out.push('\n'),
        }
        write_motions(&mut out, name, timeline);
        out.push('\n');
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out
}

fn write_motions(out: &mut String, name: &str, timeline: &Timeline) {
    if timeline.len() == 1 {
        let only = timeline.first();
        write_motion(out, name, only, only);
        return;
    }
    for (from, to) in timeline.pairs() {
        write_motion(out, name, from, to);
    }
}

fn write_motion(out: &mut String, name: &str, from: &Keyframe, to: &Keyframe) {
    let with_angles = from.shape().angle() != 0.0 || to.shape().angle() != 0.0;
    let _ = writeln!(
        out,
        "motion {}\t{}\t\t{}",
        name,
        endpoint_fields(from, with_angles).join("\t"),
        endpoint_fields(to, with_angles).join("\t")
    );
}

fn endpoint_fields(keyframe: &Keyframe, with_angle: bool) -> Vec<String> {
    let s = keyframe.shape().state();
    let mut fields = vec![
        fmt_num(keyframe.time()),
        fmt_num(s.position.x),
        fmt_num(s.position.y),
        fmt_num(s.width),
        fmt_num(s.height),
        s.color.r.to_string(),
        s.color.g.to_string(),
        s.color.b.to_string(),
    ];
    if with_angle {
        fields.push(fmt_num(s.angle));
    }
    fields
}
