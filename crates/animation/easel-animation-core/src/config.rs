//! Export configuration and document-wide constants.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::Result;

/// Keyframes closer than this are considered to sit at the same time.
pub const TIME_EPSILON: f64 = 1e-9;

/// Layer every document starts with; shapes declared without a layer land here.
pub const DEFAULT_LAYER: &str = "default";

/// Canvas bounds of a freshly created document: (x, y, width, height).
pub const DEFAULT_CANVAS: (i32, i32, i32, i32) = (0, 0, 640, 400);

/// Configuration for exporters.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Frames (keyframe time units) per second, used to turn keyframe times into
    /// milliseconds for SVG animation directives.
    pub fps: u32,
    /// Value of the root `version` attribute in SVG output.
    pub svg_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 1,
            svg_version: "1.1".to_string(),
        }
    }
}

impl Config {
    /// Config with the given playback rate and defaults elsewhere.
    pub fn with_fps(fps: u32) -> Self {
        Self {
            fps,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(AnimationError::InvalidConfig {
                reason: "fps must be > 0".into(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Milliseconds corresponding to `time` keyframe units at this rate.
    #[inline]
    pub fn to_millis(&self, time: f64) -> f64 {
        time / self.fps as f64 * 1000.0
    }
}
