//! Exporters: canonical text (round-trips through the reader) and animated SVG.
//!
//! Both walk a document through the read-only `AnimationView` surface.

pub mod svg;
pub mod svg_shapes;
pub mod text;

pub use svg::{export_svg, svg_document, SvgTag, TagKind};
pub use svg_shapes::{writer_for, SvgShapeWriter};
pub use text::export_text;

/// Shortest decimal form that reads back to the same value; `-0` prints as `0`.
pub(crate) fn fmt_num(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        v.to_string()
    }
}
