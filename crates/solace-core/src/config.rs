//! Engine configuration.
//!
//! Every field has a default matching the built-in behaviour, so an empty
//! JSON object is a valid config file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detection::ConfidenceConfig;
use crate::error::{ConfigError, Result};
use crate::intervention::{default_resources, CrisisResource};

/// History-based escalation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationConfig {
    /// A medium level becomes high once recent crisis flags exceed this.
    pub flag_count_threshold: u32,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            flag_count_threshold: 2,
        }
    }
}

/// Configuration for the detection and intervention engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub escalation: EscalationConfig,
    /// Crisis resources, most important first. Critical plans list all of
    /// them, high plans the first two, medium plans the first one.
    pub resources: Vec<CrisisResource>,
    pub confidence: ConfidenceConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            escalation: EscalationConfig::default(),
            resources: default_resources(),
            confidence: ConfidenceConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Loads and validates a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Parses and validates a config from JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.resources.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one crisis resource is required".to_string(),
            ));
        }
        if let Some(resource) = self
            .resources
            .iter()
            .find(|r| r.name.trim().is_empty() || r.contact.trim().is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "crisis resource needs a name and contact: {resource:?}"
            )));
        }

        let damping = self.confidence.neutral_damping;
        if !(damping > 0.0 && damping <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "neutral_damping must be in (0, 1], got {damping}"
            )));
        }
        let threshold = self.confidence.neutral_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "neutral_threshold must be in [0, 1], got {threshold}"
            )));
        }

        Ok(())
    }
}
