//! Solace - command-line access to the mood and crisis detection engine.
//!
//! Each subcommand runs one engine operation and renders the result as JSON.
//!
//! # Usage
//!
//! ```ignore
//! use solace_cli::{run, Command};
//! use solace_core::EngineConfig;
//!
//! let out = run(&Command::Analyze { text: "I feel great".into() }, &EngineConfig::default(), false)?;
//! println!("{out}");
//! ```

use anyhow::{Context, Result};
use clap::Subcommand;
use solace_core::{
    analyze_mood_progression, CrisisInterventionSystem, EngineConfig, RiskLevel,
    UserCrisisContext,
};

/// Engine operations exposed on the command line.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Detect mood, emotions and crisis indicators in a message
    Analyze {
        /// Message text
        text: String,
    },

    /// Assess a message for crisis risk and print the intervention plan
    Assess {
        /// Message text
        text: String,

        /// Crisis flags raised for the user recently
        #[arg(long)]
        flags: Option<u32>,

        /// The user's standing risk level (low, medium, high, critical)
        #[arg(long)]
        risk: Option<RiskLevel>,
    },

    /// Summarize a mood history given oldest to newest
    Trend {
        /// Mood labels, e.g. positive neutral very_negative
        labels: Vec<String>,
    },
}

impl Command {
    /// User context implied by the `assess` flags, if any were given.
    fn user_context(&self) -> Option<UserCrisisContext> {
        match self {
            Command::Assess { flags, risk, .. } if flags.is_some() || risk.is_some() => {
                Some(UserCrisisContext::new(
                    flags.unwrap_or(0),
                    risk.unwrap_or_default(),
                ))
            }
            _ => None,
        }
    }
}

/// Runs a command and returns its JSON output.
pub fn run(command: &Command, config: &EngineConfig, compact: bool) -> Result<String> {
    let system = CrisisInterventionSystem::from_config(config);

    let value = match command {
        Command::Analyze { text } => {
            serde_json::to_value(system.detector().detect_mood(text))
        }
        Command::Assess { text, .. } => {
            let context = command.user_context();
            serde_json::to_value(system.assess_crisis(text, context.as_ref()))
        }
        Command::Trend { labels } => serde_json::to_value(analyze_mood_progression(labels)),
    }
    .context("Failed to serialize result")?;

    let rendered = if compact {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    }
    .context("Failed to render JSON")?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_json(command: Command) -> serde_json::Value {
        let out = run(&command, &EngineConfig::default(), true).unwrap();
        serde_json::from_str(&out).unwrap()
    }

    #[test]
    fn analyze_outputs_mood_analysis() {
        let json = run_json(Command::Analyze {
            text: "I want to kill myself".to_string(),
        });
        assert_eq!(json["mood_state"], "crisis");
        assert_eq!(json["crisis_level"], "critical");
    }

    #[test]
    fn assess_without_flags_has_no_context() {
        let command = Command::Assess {
            text: "I feel a bit anxious".to_string(),
            flags: None,
            risk: None,
        };
        assert_eq!(command.user_context(), None);

        let json = run_json(command);
        assert_eq!(json["crisis_level"], "low");
        assert_eq!(json["requires_immediate_intervention"], false);
    }

    #[test]
    fn assess_with_risk_escalates() {
        let json = run_json(Command::Assess {
            text: "I feel a bit anxious".to_string(),
            flags: None,
            risk: Some(RiskLevel::High),
        });
        assert_eq!(json["crisis_level"], "medium");
        assert_eq!(json["intervention"]["immediate_actions"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn flags_alone_default_to_low_risk() {
        let command = Command::Assess {
            text: "hopeless".to_string(),
            flags: Some(4),
            risk: None,
        };
        assert_eq!(
            command.user_context(),
            Some(UserCrisisContext::new(4, RiskLevel::Low))
        );
        assert_eq!(run_json(command)["crisis_level"], "high");
    }

    #[test]
    fn trend_outputs_report() {
        let json = run_json(Command::Trend {
            labels: ["positive", "positive", "negative", "very_negative"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        });
        assert_eq!(json["trend"], "declining");
        assert_eq!(json["current_mood"], -2);
    }

    #[test]
    fn trend_with_one_label_is_insufficient() {
        let json = run_json(Command::Trend {
            labels: vec!["neutral".to_string()],
        });
        assert_eq!(json["trend"], "insufficient_data");
    }

    #[test]
    fn pretty_output_is_multiline() {
        let out = run(
            &Command::Trend { labels: vec![] },
            &EngineConfig::default(),
            false,
        )
        .unwrap();
        assert!(out.contains('\n'));
    }
}
