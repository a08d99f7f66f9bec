//! Error types for the animation document model, reader and exporters.

use serde::{Deserialize, Serialize};

use crate::shape::ShapeKind;

/// Every failure the core can report. All of them are synchronous and local:
/// they describe caller misuse or malformed input, never a transient condition.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// Negative time given to a keyframe or a snapshot query
    #[error("Invalid time value: {time} (time cannot be negative)")]
    InvalidTime { time: f64 },

    /// A shape of another kind inserted into an established timeline
    #[error("Shape '{name}' is a {expected}, cannot add a {actual} keyframe")]
    TypeConflict {
        name: String,
        expected: ShapeKind,
        actual: ShapeKind,
    },

    /// Interpolating two shapes of different kinds
    #[error("Cannot interpolate a {expected} into a {actual}")]
    TypeMismatch {
        expected: ShapeKind,
        actual: ShapeKind,
    },

    /// Interpolation progress outside [0, 1]
    #[error("Progress {progress} is out of range [0, 1]")]
    OutOfRange { progress: f64 },

    /// Interpolating from a keyframe that comes after the target keyframe
    #[error("Keyframe at {from} must not come after keyframe at {to}")]
    OrderViolation { from: f64, to: f64 },

    #[error("Shape not found: {name}")]
    UnknownShape { name: String },

    #[error("Shape already declared: {name}")]
    DuplicateShape { name: String },

    #[error("Unknown shape type: {kind}")]
    UnknownShapeKind { kind: String },

    #[error("Layer not found: {name}")]
    UnknownLayer { name: String },

    #[error("Layer already exists: {name}")]
    DuplicateLayer { name: String },

    /// Malformed field in the text format
    #[error("{keyword}: {field}: {reason}")]
    ParseError {
        keyword: String,
        field: String,
        reason: String,
    },

    /// Unrecognized leading keyword in the text format
    #[error("Unexpected keyword: {token}")]
    UnexpectedToken { token: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl AnimationError {
    /// Build a parse error for a keyword/field pair.
    pub fn parse(
        keyword: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::ParseError {
            keyword: keyword.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidTime { .. } | Self::OutOfRange { .. } | Self::OrderViolation { .. } => {
                "validation"
            }
            Self::TypeConflict { .. } | Self::TypeMismatch { .. } => "type",
            Self::UnknownShape { .. }
            | Self::DuplicateShape { .. }
            | Self::UnknownShapeKind { .. }
            | Self::UnknownLayer { .. }
            | Self::DuplicateLayer { .. } => "lookup",
            Self::ParseError { .. } | Self::UnexpectedToken { .. } => "parse",
            Self::InvalidConfig { .. } => "config",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let validation_error = AnimationError::InvalidTime { time: -1.0 };
        assert_eq!(validation_error.category(), "validation");

        let type_error = AnimationError::TypeMismatch {
            expected: ShapeKind::Rectangle,
            actual: ShapeKind::Ellipse,
        };
        assert_eq!(type_error.category(), "type");

        let parse_error = AnimationError::parse("Motion", "initial x-coordinate", "got: abc");
        assert_eq!(parse_error.category(), "parse");
    }

    #[test]
    fn test_parse_error_message_names_keyword_and_field() {
        let error = AnimationError::parse("Canvas", "width", "expected a number, got: wide");
        assert_eq!(
            error.to_string(),
            "Canvas: width: expected a number, got: wide"
        );
    }

    #[test]
    fn test_serialization() {
        let error = AnimationError::UnknownShape {
            name: "R".to_string(),
        };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: AnimationError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
