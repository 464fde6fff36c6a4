//! Engine configuration
//!
//! Every field has a default and the file is optional. Loaded once at
//! startup, e.g. from `tint.toml`:
//!
//! ```toml
//! opaque_threshold = 0.999
//! forced_cull = "back"
//! transparent_queue = 3000
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::gfx::resources::{material::RENDER_QUEUE_TRANSPARENT, CullMode};

/// Alpha (on the `[0, 1]` scale) at or above which a surface is drawn opaque
///
/// 255/255 passes, 254/255 does not. Every component that decides between
/// the opaque and transparent configuration reads this one value.
pub const OPAQUE_ALPHA_THRESHOLD: f32 = 0.999;

/// Tunables of the synchronization engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// See [`OPAQUE_ALPHA_THRESHOLD`]
    pub opaque_threshold: f32,
    /// Cull mode every touched material is normalized to
    pub forced_cull: CullMode,
    /// Draw-order bucket of derived transparent variants
    pub transparent_queue: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            opaque_threshold: OPAQUE_ALPHA_THRESHOLD,
            forced_cull: CullMode::Back,
            transparent_queue: RENDER_QUEUE_TRANSPARENT,
        }
    }
}

impl EngineConfig {
    /// Parses and validates TOML config text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.opaque_threshold > 0.0 && self.opaque_threshold <= 1.0) {
            return Err(ConfigError::Validation(format!(
                "opaque_threshold must be in (0, 1], got {}",
                self.opaque_threshold
            )));
        }
        Ok(())
    }

    /// True if `alpha` (on the `[0, 1]` scale) requires the transparent variant
    pub fn needs_transparency(&self, alpha: f32) -> bool {
        alpha < self.opaque_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml_str("forced_cull = \"off\"\n").unwrap();
        assert_eq!(config.forced_cull, CullMode::Off);
        assert_eq!(config.opaque_threshold, OPAQUE_ALPHA_THRESHOLD);
    }

    #[test]
    fn test_threshold_boundary() {
        let config = EngineConfig::default();
        assert!(!config.needs_transparency(1.0));
        assert!(config.needs_transparency(254.0 / 255.0));
        assert!(config.needs_transparency(0.0));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = EngineConfig::from_toml_str("opaque_threshold = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = EngineConfig::from_toml_str("opaque_threshold = \"high\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
