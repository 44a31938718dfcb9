//! Discrete labels produced by the detection engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Crisis severity, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CrisisLevel {
    /// No crisis language detected.
    #[default]
    None,
    /// One or two warning signs.
    Low,
    /// A single medium-risk phrase or three or more warning signs.
    Medium,
    /// Two or more medium-risk phrases.
    High,
    /// Any high-risk phrase.
    Critical,
}

impl CrisisLevel {
    /// Returns all levels in ascending severity.
    pub fn all() -> &'static [CrisisLevel] {
        &[
            CrisisLevel::None,
            CrisisLevel::Low,
            CrisisLevel::Medium,
            CrisisLevel::High,
            CrisisLevel::Critical,
        ]
    }

    /// Returns the snake_case label for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            CrisisLevel::None => "none",
            CrisisLevel::Low => "low",
            CrisisLevel::Medium => "medium",
            CrisisLevel::High => "high",
            CrisisLevel::Critical => "critical",
        }
    }

    /// Returns true if this level calls for immediate intervention.
    pub fn requires_immediate_intervention(&self) -> bool {
        matches!(self, CrisisLevel::High | CrisisLevel::Critical)
    }
}

impl fmt::Display for CrisisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standing risk level kept on a user record by the caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Returns the snake_case label for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            other => Err(ConfigError::Invalid(format!("unknown risk level: {other}"))),
        }
    }
}

/// Overall mood of a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodState {
    VeryPositive,
    Positive,
    #[default]
    Neutral,
    Negative,
    VeryNegative,
    /// Overrides every other state when a high-risk phrase is present.
    Crisis,
}

impl MoodState {
    /// Returns all mood states from most positive to crisis.
    pub fn all() -> &'static [MoodState] {
        &[
            MoodState::VeryPositive,
            MoodState::Positive,
            MoodState::Neutral,
            MoodState::Negative,
            MoodState::VeryNegative,
            MoodState::Crisis,
        ]
    }

    /// Returns the snake_case label used when the state is stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodState::VeryPositive => "very_positive",
            MoodState::Positive => "positive",
            MoodState::Neutral => "neutral",
            MoodState::Negative => "negative",
            MoodState::VeryNegative => "very_negative",
            MoodState::Crisis => "crisis",
        }
    }

    /// Position on the trend scale (very_positive = 2 down to crisis = -3).
    pub fn numeric(&self) -> i32 {
        match self {
            MoodState::VeryPositive => 2,
            MoodState::Positive => 1,
            MoodState::Neutral => 0,
            MoodState::Negative => -1,
            MoodState::VeryNegative => -2,
            MoodState::Crisis => -3,
        }
    }

    /// Parses a stored label. Returns `None` for anything unrecognised.
    pub fn from_label(label: &str) -> Option<MoodState> {
        MoodState::all()
            .iter()
            .copied()
            .find(|state| state.as_str() == label)
    }
}

impl fmt::Display for MoodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
