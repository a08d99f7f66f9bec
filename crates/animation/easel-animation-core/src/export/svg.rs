//! Generic markup tag tree and the SVG document exporter.

use std::fmt;

use crate::config::Config;
use crate::export::svg_shapes::writer_for;
use crate::model::AnimationView;
use crate::timeline::Timeline;
use crate::Result;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>` children `</name>`
    Container,
    /// `<name ... />`
    SelfClosing,
}

/// A markup element: name, ordered attributes and ordered children.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgTag {
    name: String,
    kind: TagKind,
    attributes: Vec<(String, String)>,
    children: Vec<SvgTag>,
}

impl SvgTag {
    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TagKind::Container,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn self_closing(name: impl Into<String>) -> Self {
        Self {
            kind: TagKind::SelfClosing,
            ..Self::container(name)
        }
    }

    /// Builder-style attribute append.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(name, value);
        self
    }

    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    pub fn add_child(&mut self, child: SvgTag) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TagKind {
        self.kind
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// First value of attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[SvgTag] {
        &self.children
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Display for SvgTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (k, v) in &self.attributes {
            write!(f, " {}=\"{}\"", k, escape_attr(v))?;
        }
        match self.kind {
            TagKind::SelfClosing => writeln!(f, " />"),
            TagKind::Container => {
                writeln!(f, ">")?;
                for child in &self.children {
                    write!(f, "{child}")?;
                }
                writeln!(f, "</{}>", self.name)
            }
        }
    }
}

/// Build the SVG tag tree for `view`: one child per shape, in draw order.
pub fn svg_document<V: AnimationView + ?Sized>(view: &V, config: &Config) -> Result<SvgTag> {
    config.validate()?;
    let canvas = view.canvas();
    let mut svg = SvgTag::container("svg")
        .attr("width", canvas.width.to_string())
        .attr("height", canvas.height.to_string())
        .attr("version", config.svg_version.as_str())
        .attr("xmlns", SVG_NAMESPACE);

    for name in view.draw_order() {
        if let Some(timeline) = view.timeline(name) {
            svg.add_child(shape_to_svg(view, name, timeline, config));
        }
    }
    Ok(svg)
}

/// Render `view` as an SVG document string.
pub fn export_svg<V: AnimationView + ?Sized>(view: &V, config: &Config) -> Result<String> {
    Ok(svg_document(view, config)?.to_string())
}

fn shape_to_svg<V: AnimationView + ?Sized>(
    view: &V,
    name: &str,
    timeline: &Timeline,
    config: &Config,
) -> SvgTag {
    let canvas = view.canvas();
    let writer = writer_for(timeline.kind());
    let mut tag = writer.shape_tag(name, timeline.first().shape(), canvas);
    for (from, to) in timeline.pairs() {
        for motion in writer.motion_tags(from, to, canvas, config) {
            tag.add_child(motion);
        }
    }
    tag
}
