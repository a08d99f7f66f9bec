//! Reader for the line-oriented text animation format.
//!
//! Grammar (tokens are whitespace separated, `#` starts a comment that runs to
//! the end of the line):
//! - `canvas x y w h`
//! - `layer name`
//! - `shape name type [layer]`
//! - `motion name t1 x1 y1 w1 h1 r1 g1 b1 [a1] t2 x2 y2 w2 h2 r2 g2 b2 [a2]`
//!
//! `shape` and `motion` take the rest of their line, so optional fields are
//! recognised by count: a motion line carries angles when it has 18 values
//! after the name. `canvas` and `layer` read the next tokens wherever they are.

use log::trace;

use crate::builder::{AnimationBuilder, AnimationModelBuilder, KeyframeParams};
use crate::error::AnimationError;
use crate::geometry::normalize_angle;
use crate::model::AnimationModel;
use crate::shape::Color;
use crate::Result;

const MOTION_FIELDS: [&str; 18] = [
    "initial time",
    "initial x-coordinate",
    "initial y-coordinate",
    "initial width",
    "initial height",
    "initial red value",
    "initial green value",
    "initial blue value",
    "initial angle",
    "final time",
    "final x-coordinate",
    "final y-coordinate",
    "final width",
    "final height",
    "final red value",
    "final green value",
    "final blue value",
    "final angle",
];

const MOTION_VALUES_WITHOUT_ANGLES: usize = 16;
const MOTION_VALUES_WITH_ANGLES: usize = 18;

/// Parse `input` and drive `builder` with its contents, returning the built document.
pub fn parse_animation<B: AnimationBuilder>(input: &str, mut builder: B) -> Result<B::Output> {
    let mut tokens = TokenStream::new(input);
    while let Some(keyword) = tokens.next_token() {
        trace!("reader: keyword '{}' on line {}", keyword, tokens.line_number());
        match keyword {
            "canvas" => read_canvas(&mut tokens, &mut builder)?,
            "shape" => read_shape(&mut tokens, &mut builder)?,
            "motion" => read_motion(&mut tokens, &mut builder)?,
            "layer" => read_layer(&mut tokens, &mut builder)?,
            other => {
                return Err(AnimationError::UnexpectedToken {
                    token: other.to_string(),
                })
            }
        }
    }
    Ok(builder.build())
}

/// Parse `input` into an `AnimationModel`.
pub fn parse_model(input: &str) -> Result<AnimationModel> {
    parse_animation(input, AnimationModelBuilder::new())
}

/// Whitespace tokens grouped by line, with comments removed.
struct TokenStream<'a> {
    lines: Vec<Vec<&'a str>>,
    line: usize,
    col: usize,
}

impl<'a> TokenStream<'a> {
    fn new(input: &'a str) -> Self {
        let lines = input
            .lines()
            .map(|line| {
                let code = line.split('#').next().unwrap_or("");
                code.split_whitespace().collect()
            })
            .collect();
        Self {
            lines,
            line: 0,
            col: 0,
        }
    }

    fn line_number(&self) -> usize {
        self.line + 1
    }

    fn next_token(&mut self) -> Option<&'a str> {
        while self.line < self.lines.len() {
            if let Some(&tok) = self.lines[self.line].get(self.col) {
                self.col += 1;
                return Some(tok);
            }
            self.line += 1;
            self.col = 0;
        }
        None
    }

    /// Remaining tokens of the current line; the stream moves to the next line.
    fn rest_of_line(&mut self) -> &[&'a str] {
        if self.line >= self.lines.len() {
            return &[];
        }
        let line = self.line;
        let col = self.col.min(self.lines[line].len());
        self.line += 1;
        self.col = 0;
        &self.lines[line][col..]
    }
}

fn number<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    keyword: &str,
    field: &str,
) -> Result<f64> {
    let tok = tokens.next().ok_or_else(|| {
        AnimationError::parse(
            keyword,
            field,
            "expected a number, but no more input available",
        )
    })?;
    match tok.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AnimationError::parse(
            keyword,
            field,
            format!("expected a number, got: {tok}"),
        )),
    }
}

fn non_negative<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    keyword: &str,
    field: &str,
) -> Result<f64> {
    let v = number(tokens, keyword, field)?;
    if v < 0.0 {
        return Err(AnimationError::parse(
            keyword,
            field,
            format!("expected a non-negative number, got: {v}"),
        ));
    }
    Ok(v)
}

fn channel<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    keyword: &str,
    field: &str,
) -> Result<u8> {
    let v = number(tokens, keyword, field)?;
    if v.fract() != 0.0 || !(0.0..=255.0).contains(&v) {
        return Err(AnimationError::parse(
            keyword,
            field,
            format!("expected a color value in 0..=255, got: {v}"),
        ));
    }
    Ok(v as u8)
}

fn read_canvas<B: AnimationBuilder>(tokens: &mut TokenStream<'_>, builder: &mut B) -> Result<()> {
    let mut vals = [0i32; 4];
    let mut stream = std::iter::from_fn(|| tokens.next_token());
    for (val, field) in vals.iter_mut().zip(["left", "top", "width", "height"]) {
        *val = number(&mut stream, "Canvas", field)? as i32;
    }
    builder.set_bounds(vals[0], vals[1], vals[2], vals[3]);
    Ok(())
}

fn read_layer<B: AnimationBuilder>(tokens: &mut TokenStream<'_>, builder: &mut B) -> Result<()> {
    let name = tokens.next_token().ok_or_else(|| {
        AnimationError::parse(
            "Layer",
            "name",
            "expected a name, but no more input available",
        )
    })?;
    builder.declare_layer(name)?;
    Ok(())
}

fn read_shape<B: AnimationBuilder>(tokens: &mut TokenStream<'_>, builder: &mut B) -> Result<()> {
    match *tokens.rest_of_line() {
        [] => Err(AnimationError::parse(
            "Shape",
            "name",
            "expected a name, but no more input available",
        )),
        [_] => Err(AnimationError::parse(
            "Shape",
            "type",
            "expected a type, but no more input available",
        )),
        [name, kind] => builder.declare_shape(name, kind).map(|_| ()),
        [name, kind, layer] => builder
            .declare_shape_in_layer(name, kind, layer)
            .map(|_| ()),
        [_, _, _, extra, ..] => Err(AnimationError::parse(
            "Shape",
            "layer",
            format!("unexpected extra input: {extra}"),
        )),
    }
}

fn read_motion<B: AnimationBuilder>(tokens: &mut TokenStream<'_>, builder: &mut B) -> Result<()> {
    let line = tokens.rest_of_line();
    let (name, values) = match line.split_first() {
        Some((name, values)) => (*name, values),
        None => {
            return Err(AnimationError::parse(
                "Motion",
                "shape name",
                "expected a shape name, but no more input available",
            ))
        }
    };

    let with_angles = values.len() == MOTION_VALUES_WITH_ANGLES;
    if values.len() > MOTION_VALUES_WITHOUT_ANGLES && !with_angles {
        return Err(AnimationError::parse(
            "Motion",
            "line",
            format!(
                "expected {MOTION_VALUES_WITHOUT_ANGLES} or {MOTION_VALUES_WITH_ANGLES} values, found {}",
                values.len()
            ),
        ));
    }

    let mut it = values.iter().copied();
    let from = read_endpoint(&mut it, &MOTION_FIELDS[..9], with_angles)?;
    let to = read_endpoint(&mut it, &MOTION_FIELDS[9..], with_angles)?;
    builder.add_motion(name, from, to)?;
    Ok(())
}

/// Reads one motion endpoint; `fields` names its nine slots, angle last.
fn read_endpoint<'a>(
    it: &mut impl Iterator<Item = &'a str>,
    fields: &[&str],
    with_angle: bool,
) -> Result<KeyframeParams> {
    const KW: &str = "Motion";
    let time = number(it, KW, fields[0])?;
    let x = number(it, KW, fields[1])?;
    let y = number(it, KW, fields[2])?;
    let width = non_negative(it, KW, fields[3])?;
    let height = non_negative(it, KW, fields[4])?;
    let r = channel(it, KW, fields[5])?;
    let g = channel(it, KW, fields[6])?;
    let b = channel(it, KW, fields[7])?;
    let angle = if with_angle {
        normalize_angle(number(it, KW, fields[8])?)
    } else {
        0.0
    };
    Ok(KeyframeParams {
        time,
        x,
        y,
        width,
        height,
        color: Color::rgb(r, g, b),
        angle,
    })
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use super::*;
    use crate::export::export_text;
    use crate::model::{AnimationView, Canvas};
    use crate::shape::ShapeKind;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let input = "# header\n\ncanvas 1 2 # trailing\n 3 4\n";
        let model = parse_model(input).unwrap();
        assert_eq!(model.canvas(), Canvas::new(1, 2, 3, 4));
    }

    #[test]
    fn unknown_keyword_is_rejected() {
        assert_eq!(
            parse_model("circle C 1 2").unwrap_err(),
            AnimationError::UnexpectedToken {
                token: "circle".into()
            }
        );
    }

    #[test]
    fn motion_without_angles_defaults_to_zero() {
        let input = "shape R rectangle\nmotion R 1 200 200 50 100 255 0 0  10 200 200 50 100 255 0 0\n";
        let model = parse_model(input).unwrap();
        let tl = model.timeline("R").unwrap();
        assert_eq!(tl.kind(), ShapeKind::Rectangle);
        assert_eq!(tl.len(), 2);
        assert!(tl.iter().all(|k| k.shape().angle() == 0.0));
    }

    #[test]
    fn motion_angles_are_reduced_modulo_tau() {
        let input = "shape R rectangle\nmotion R 1 0 0 5 5 0 0 0 7 10 0 0 5 5 0 0 0 -1\n";
        let model = parse_model(input).unwrap();
        let tl = model.timeline("R").unwrap();
        assert!((tl.first().shape().angle() - (7.0 - TAU)).abs() < 1e-12);
        assert!((tl.last().shape().angle() - (TAU - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn tiny_negative_angle_wraps_to_zero_and_reexports_stably() {
        let input = "shape R rectangle\nmotion R 0 0 0 1 1 0 0 0 -1e-20 1 0 0 1 1 0 0 0 0\n";
        let model = parse_model(input).unwrap();
        let angle = model.timeline("R").unwrap().first().shape().angle();
        assert!((0.0..TAU).contains(&angle), "got {angle}");

        let first = export_text(&model);
        let second = export_text(&parse_model(&first).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn bad_numeric_field_names_keyword_and_field() {
        let input = "shape R rectangle\nmotion R 1 0 zero 5 5 0 0 0 10 0 0 5 5 0 0 0\n";
        assert_eq!(
            parse_model(input).unwrap_err(),
            AnimationError::parse(
                "Motion",
                "initial y-coordinate",
                "expected a number, got: zero"
            )
        );
    }

    #[test]
    fn short_motion_reports_first_missing_field() {
        let input = "shape R rectangle\nmotion R 1 0 0 5 5 0 0 0 10 0 0\n";
        assert_eq!(
            parse_model(input).unwrap_err(),
            AnimationError::parse(
                "Motion",
                "final width",
                "expected a number, but no more input available"
            )
        );
    }

    #[test]
    fn out_of_range_color_is_a_parse_error() {
        let input = "shape R rectangle\nmotion R 1 0 0 5 5 300 0 0 10 0 0 5 5 0 0 0\n";
        assert!(matches!(
            parse_model(input),
            Err(AnimationError::ParseError { ref field, .. }) if field == "initial red value"
        ));
    }

    #[test]
    fn canvas_with_missing_fields_fails() {
        assert_eq!(
            parse_model("canvas 0 0 100").unwrap_err(),
            AnimationError::parse(
                "Canvas",
                "height",
                "expected a number, but no more input available"
            )
        );
    }

    #[test]
    fn shape_with_optional_layer() {
        let input = "layer fg\nshape C ellipse fg\nmotion C 0 1 1 1 1 0 0 0 5 1 1 1 1 0 0 0\n";
        let model = parse_model(input).unwrap();
        assert_eq!(model.layer_of("C"), Some("fg"));
    }

    #[test]
    fn shape_missing_type_fails() {
        assert_eq!(
            parse_model("shape R\n").unwrap_err(),
            AnimationError::parse(
                "Shape",
                "type",
                "expected a type, but no more input available"
            )
        );
    }
}
