//! Per-kind SVG writers: element name, geometry attributes and the animation
//! directives emitted between two keyframes.

use crate::config::Config;
use crate::export::fmt_num;
use crate::export::svg::SvgTag;
use crate::geometry::Point;
use crate::keyframe::Keyframe;
use crate::model::Canvas;
use crate::shape::{Shape, ShapeKind};

/// Strategy for rendering one shape kind as SVG.
pub trait SvgShapeWriter: Sync {
    fn element_name(&self) -> &'static str;

    /// Position and size attributes in document order: x, y, width, height.
    fn geometry(&self, shape: &Shape, canvas: Canvas) -> [(&'static str, f64); 4];

    /// Point the `rotate` transform turns around.
    fn rotation_center(&self, shape: &Shape, canvas: Canvas) -> Point;

    /// Static element for `shape`, without animation children. The rotate
    /// transform is always present so animated rotation has an explicit base.
    fn shape_tag(&self, id: &str, shape: &Shape, canvas: Canvas) -> SvgTag {
        let mut tag = SvgTag::container(self.element_name())
            .attr("id", id)
            .attr("fill", shape.color().to_string())
            .attr("visibility", "visible");
        for (name, value) in self.geometry(shape, canvas) {
            tag.add_attribute(name, fmt_num(value));
        }
        let rotation = self.rotate_value(shape, canvas);
        tag.add_attribute("transform", format!("rotate({rotation})"));
        tag
    }

    /// One directive per attribute that differs between `from` and `to`,
    /// in the order x, y, width, height, fill, rotation.
    fn motion_tags(
        &self,
        from: &Keyframe,
        to: &Keyframe,
        canvas: Canvas,
        config: &Config,
    ) -> Vec<SvgTag> {
        let begin = config.to_millis(from.time());
        let dur = config.to_millis(to.time() - from.time());
        let animate = |name: &str, from: String, to: String| {
            SvgTag::self_closing("animate")
                .attr("attributeType", "xml")
                .attr("begin", format!("{}ms", fmt_num(begin)))
                .attr("dur", format!("{}ms", fmt_num(dur)))
                .attr("attributeName", name)
                .attr("from", from)
                .attr("to", to)
                .attr("fill", "freeze")
        };

        let (a, b) = (from.shape(), to.shape());
        let mut tags = Vec::new();
        let start = self.geometry(a, canvas);
        let end = self.geometry(b, canvas);
        for ((name, v0), (_, v1)) in start.into_iter().zip(end) {
            if v0 != v1 {
                tags.push(animate(name, fmt_num(v0), fmt_num(v1)));
            }
        }
        if a.color() != b.color() {
            tags.push(animate("fill", a.color().to_string(), b.color().to_string()));
        }
        if a.angle() != b.angle() {
            tags.push(
                SvgTag::self_closing("animateTransform")
                    .attr("attributeType", "xml")
                    .attr("begin", format!("{}ms", fmt_num(begin)))
                    .attr("dur", format!("{}ms", fmt_num(dur)))
                    .attr("attributeName", "transform")
                    .attr("type", "rotate")
                    .attr("from", self.rotate_value(a, canvas))
                    .attr("to", self.rotate_value(b, canvas))
                    .attr("fill", "freeze"),
            );
        }
        tags
    }

    /// `deg cx cy` argument list of a rotate transform.
    fn rotate_value(&self, shape: &Shape, canvas: Canvas) -> String {
        let c = self.rotation_center(shape, canvas);
        format!(
            "{} {} {}",
            fmt_num(shape.angle().to_degrees()),
            fmt_num(c.x),
            fmt_num(c.y)
        )
    }
}

/// `<rect>`: upper-left corner relative to the canvas origin.
pub struct RectangleWriter;

impl SvgShapeWriter for RectangleWriter {
    fn element_name(&self) -> &'static str {
        ShapeKind::Rectangle.svg_name()
    }

    fn geometry(&self, shape: &Shape, canvas: Canvas) -> [(&'static str, f64); 4] {
        let p = shape.position();
        [
            ("x", p.x - canvas.x as f64),
            ("y", p.y - canvas.y as f64),
            ("width", shape.width()),
            ("height", shape.height()),
        ]
    }

    fn rotation_center(&self, shape: &Shape, canvas: Canvas) -> Point {
        shape
            .center()
            .offset(-(canvas.x as f64), -(canvas.y as f64))
    }
}

/// `<ellipse>`: center offset by the canvas origin, radii from width and height.
pub struct EllipseWriter;

impl SvgShapeWriter for EllipseWriter {
    fn element_name(&self) -> &'static str {
        ShapeKind::Ellipse.svg_name()
    }

    fn geometry(&self, shape: &Shape, canvas: Canvas) -> [(&'static str, f64); 4] {
        let p = shape.position();
        [
            ("cx", p.x + canvas.x as f64),
            ("cy", p.y + canvas.y as f64),
            ("rx", shape.width()),
            ("ry", shape.height()),
        ]
    }

    fn rotation_center(&self, shape: &Shape, canvas: Canvas) -> Point {
        shape.center().offset(canvas.x as f64, canvas.y as f64)
    }
}

static RECTANGLE: RectangleWriter = RectangleWriter;
static ELLIPSE: EllipseWriter = EllipseWriter;

pub fn writer_for(kind: ShapeKind) -> &'static dyn SvgShapeWriter {
    match kind {
        ShapeKind::Rectangle => &RECTANGLE,
        ShapeKind::Ellipse => &ELLIPSE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Color;

    fn kf(time: f64, shape: Shape) -> Keyframe {
        Keyframe::new(time, shape).unwrap()
    }

    #[test]
    fn rectangle_is_placed_relative_to_canvas() {
        let canvas = Canvas::new(200, 70, 360, 360);
        let r = Shape::rectangle(Point::new(200.0, 200.0), 50.0, 100.0, Color::rgb(255, 0, 0));
        let tag = writer_for(ShapeKind::Rectangle).shape_tag("R", &r, canvas);
        assert_eq!(tag.name(), "rect");
        assert_eq!(tag.attribute("x"), Some("0"));
        assert_eq!(tag.attribute("y"), Some("130"));
        assert_eq!(tag.attribute("fill"), Some("rgb(255,0,0)"));
        assert_eq!(tag.attribute("transform"), Some("rotate(0 25 180)"));
    }

    #[test]
    fn ellipse_uses_center_and_radii() {
        let canvas = Canvas::new(10, 20, 100, 100);
        let c = Shape::ellipse(Point::new(5.0, 5.0), 30.0, 15.0, Color::rgb(0, 0, 255));
        let tag = writer_for(ShapeKind::Ellipse).shape_tag("C", &c, canvas);
        assert_eq!(tag.attribute("cx"), Some("15"));
        assert_eq!(tag.attribute("cy"), Some("25"));
        assert_eq!(tag.attribute("rx"), Some("30"));
        assert_eq!(tag.attribute("ry"), Some("15"));
    }

    #[test]
    fn only_changed_attributes_are_animated() {
        let canvas = Canvas::default();
        let a = Shape::rectangle(Point::new(0.0, 0.0), 10.0, 10.0, Color::rgb(0, 0, 0));
        let b = a.clone().with_position(Point::new(0.0, 40.0));
        let tags = writer_for(ShapeKind::Rectangle).motion_tags(
            &kf(2.0, a),
            &kf(6.0, b),
            canvas,
            &Config::with_fps(2),
        );
        assert_eq!(tags.len(), 1);
        let t = &tags[0];
        assert_eq!(t.attribute("attributeName"), Some("y"));
        assert_eq!(t.attribute("begin"), Some("1000ms"));
        assert_eq!(t.attribute("dur"), Some("2000ms"));
        assert_eq!(t.attribute("from"), Some("0"));
        assert_eq!(t.attribute("to"), Some("40"));
        assert_eq!(t.attribute("fill"), Some("freeze"));
    }

    #[test]
    fn rotation_is_animated_about_the_center() {
        let canvas = Canvas::default();
        let a = Shape::rectangle(Point::new(0.0, 0.0), 10.0, 20.0, Color::rgb(0, 0, 0));
        let b = a.clone().with_angle(std::f64::consts::FRAC_PI_2);
        let tags = writer_for(ShapeKind::Rectangle).motion_tags(
            &kf(0.0, a),
            &kf(1.0, b),
            canvas,
            &Config::default(),
        );
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name(), "animateTransform");
        assert_eq!(tags[0].attribute("type"), Some("rotate"));
        assert_eq!(tags[0].attribute("from"), Some("0 5 10"));
        let to: Vec<f64> = tags[0]
            .attribute("to")
            .unwrap()
            .split(' ')
            .map(|v| v.parse().unwrap())
            .collect();
        assert!((to[0] - 90.0).abs() < 1e-9);
        assert_eq!(&to[1..], &[5.0, 10.0]);
    }
}
