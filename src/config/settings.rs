use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::script::{AnimationScript, ScriptConfig};
use crate::foundation::error::{BlinkError, BlinkResult};
use crate::morph::policy::MorphPolicy;
use crate::shapes::catalog::EyeStyle;

/// JSON settings document handed to the engine by the host.
///
/// Every field is optional:
///
/// ```json
/// { "style": "v2", "exercise_closed_seconds": 3.0, "time_scale": 1.0,
///   "script": { "arrival_blink_count": 2 } }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlinkSettings {
    /// Eye style to render.
    pub style: EyeStyle,
    /// Morph policy; the style's own policy when absent.
    pub policy: Option<MorphPolicy>,
    /// Overrides how long each exercise blink stays closed.
    pub exercise_closed_seconds: Option<f64>,
    /// Multiplier applied to every duration (preview playback).
    pub time_scale: f64,
    /// Timing constants.
    pub script: ScriptConfig,
}

impl Default for BlinkSettings {
    fn default() -> Self {
        Self {
            style: EyeStyle::default(),
            policy: None,
            exercise_closed_seconds: None,
            time_scale: 1.0,
            script: ScriptConfig::default(),
        }
    }
}

impl BlinkSettings {
    /// Parse settings from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BlinkResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BlinkError::serde(format!("parse settings JSON: {e}")))
    }

    /// Parse settings from a JSON string.
    pub fn from_json_str(s: &str) -> BlinkResult<Self> {
        serde_json::from_str(s).map_err(|e| BlinkError::serde(format!("parse settings JSON: {e}")))
    }

    /// Parse settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BlinkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BlinkError::config(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every value without building anything.
    pub fn validate(&self) -> BlinkResult<()> {
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(BlinkError::config(format!(
                "time_scale must be finite and > 0 (got {})",
                self.time_scale
            )));
        }
        if let Some(secs) = self.exercise_closed_seconds
            && (!secs.is_finite() || secs < 0.0)
        {
            return Err(BlinkError::config(format!(
                "exercise_closed_seconds must be finite and >= 0 (got {secs})"
            )));
        }
        self.script.validate()
    }

    /// Effective timing constants: overrides applied, then time scale.
    pub fn script_config(&self) -> BlinkResult<ScriptConfig> {
        self.validate()?;
        let mut cfg = self.script.clone();
        if let Some(secs) = self.exercise_closed_seconds {
            cfg.exercise_hold_closed = secs;
        }
        cfg.time_scaled(self.time_scale)
    }

    /// Build the playback script.
    pub fn script(&self) -> BlinkResult<AnimationScript> {
        let cfg = self.script_config()?;
        AnimationScript::from_config(&cfg)
    }

    /// Effective morph policy.
    pub fn policy(&self) -> MorphPolicy {
        self.policy
            .unwrap_or_else(|| MorphPolicy::for_style(self.style))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
