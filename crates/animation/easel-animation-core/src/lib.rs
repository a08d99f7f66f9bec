//! Easel Animation Core
//!
//! Keyframe document model for 2D vector animations: shapes (rectangles and
//! ellipses) whose position, size, color and rotation are keyed over time and
//! linearly interpolated between keyframes. Documents are read from a small
//! line-oriented text format through the `AnimationBuilder` contract and
//! written back as text or as an animated SVG.

pub mod actions;
pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod keyframe;
pub mod layers;
pub mod model;
pub mod reader;
pub mod shape;
pub mod timeline;

// Re-exports for consumers (editors, viewers, exporters)
pub use actions::EditAction;
pub use builder::{AnimationBuilder, AnimationModelBuilder, KeyframeParams};
pub use config::{Config, DEFAULT_LAYER, TIME_EPSILON};
pub use error::AnimationError;
pub use export::{export_svg, export_text, svg_document, SvgTag};
pub use geometry::{lerp, normalize_angle, Point};
pub use keyframe::Keyframe;
pub use layers::LayerStack;
pub use model::{AnimationModel, AnimationView, Canvas};
pub use reader::{parse_animation, parse_model};
pub use shape::{Color, Shape, ShapeKind, ShapeState};
pub use timeline::Timeline;

pub type Result<T> = core::result::Result<T, AnimationError>;
