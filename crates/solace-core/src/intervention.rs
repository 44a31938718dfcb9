//! Crisis assessment and intervention selection.
//!
//! An assessment runs mood detection, escalates the crisis level using the
//! caller's short-term history, and picks an intervention tier:
//!
//! | Level    | Actions | Resources | Message     | Follow-up |
//! |----------|---------|-----------|-------------|-----------|
//! | critical | 4       | all       | crisis      | yes       |
//! | high     | 4       | first 2   | supportive  | yes       |
//! | medium   | 3       | first 1   | encouraging | no        |
//! | low/none | none    | none      | none        | no        |

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, EscalationConfig};
use crate::detection::{CrisisLevel, LexiconScorer, MoodAnalysis, MoodDetector, RiskLevel, SentimentScorer};

/// A hotline or service to surface during a crisis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisResource {
    pub name: String,
    pub contact: String,
}

impl CrisisResource {
    /// Creates a new resource entry.
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
        }
    }
}

/// The US resource directory, most important first.
pub fn default_resources() -> Vec<CrisisResource> {
    vec![
        CrisisResource::new("National Suicide Prevention Lifeline", "988"),
        CrisisResource::new("Crisis Text Line", "Text HOME to 741741"),
        CrisisResource::new("NAMI Helpline", "1-800-950-NAMI (6264)"),
        CrisisResource::new("SAMHSA National Helpline", "1-800-662-4357"),
    ]
}

pub const CRISIS_MESSAGE: &str = "I'm deeply concerned about what you're sharing. Your life has value and this pain you're feeling can be addressed with proper support.

Please reach out for immediate help:
• Call 988 (Suicide & Crisis Lifeline) - available 24/7
• Text HOME to 741741 (Crisis Text Line)
• Call 911 if you're in immediate danger

You don't have to go through this alone. Trained counselors are available right now who want to help you through this difficult moment.";

pub const SUPPORTIVE_MESSAGE: &str = "I can see you're going through an incredibly difficult time. These feelings you're experiencing are real and valid, and it's important that you get the support you deserve.

Would you like to talk more about what you're experiencing? I'm here to listen without judgment.

Remember, help is always available:
• Crisis Line: 988
• Text Support: Text HOME to 741741";

pub const ENCOURAGING_MESSAGE: &str = "I understand you're facing some challenges right now. It takes courage to reach out and share what you're going through.

Let's work together to find some strategies that might help you feel better. What specific aspect would you like to focus on first?";

const CRITICAL_ACTIONS: &[&str] = &[
    "Display crisis resources prominently",
    "Send alert to support team",
    "Offer immediate connection to crisis hotline",
    "Maintain engagement with de-escalation techniques",
];

const HIGH_ACTIONS: &[&str] = &[
    "Show crisis resources",
    "Engage with supportive dialogue",
    "Assess immediate safety",
    "Offer coping strategies",
];

const MEDIUM_ACTIONS: &[&str] = &[
    "Provide emotional support",
    "Suggest coping techniques",
    "Monitor for escalation",
];

/// Short-term risk summary kept by the caller on the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserCrisisContext {
    /// Crisis flags raised for this user recently.
    pub recent_crisis_flag_count: u32,
    pub risk_level: RiskLevel,
}

impl UserCrisisContext {
    /// Creates a new context.
    pub fn new(recent_crisis_flag_count: u32, risk_level: RiskLevel) -> Self {
        Self {
            recent_crisis_flag_count,
            risk_level,
        }
    }

    /// The context the caller should store after an assessment.
    ///
    /// An assessment that required immediate intervention raises a new flag
    /// and sets the risk level to high. Otherwise the context is unchanged.
    pub fn after_assessment(&self, assessment: &CrisisAssessment) -> Self {
        if !assessment.requires_immediate_intervention {
            return *self;
        }
        Self {
            recent_crisis_flag_count: self.recent_crisis_flag_count.saturating_add(1),
            risk_level: self.risk_level.max(RiskLevel::High),
        }
    }
}

/// What to do about a message at a given crisis level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InterventionPlan {
    pub level: CrisisLevel,
    pub immediate_actions: Vec<String>,
    pub resources: Vec<CrisisResource>,
    pub de_escalation_message: String,
    pub follow_up_required: bool,
}

impl InterventionPlan {
    /// A plan with nothing to do.
    pub fn none(level: CrisisLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Returns true if the plan asks the caller to do anything.
    pub fn is_empty(&self) -> bool {
        self.immediate_actions.is_empty()
            && self.resources.is_empty()
            && self.de_escalation_message.is_empty()
    }
}

/// Result of assessing one message for crisis risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisAssessment {
    /// Level after history-based escalation.
    pub crisis_level: CrisisLevel,
    pub requires_immediate_intervention: bool,
    pub mood_analysis: MoodAnalysis,
    pub intervention: InterventionPlan,
    pub timestamp: DateTime<Utc>,
}

/// Assesses messages for crisis risk and selects interventions.
#[derive(Debug, Clone)]
pub struct CrisisInterventionSystem {
    detector: MoodDetector,
    escalation: EscalationConfig,
    resources: Vec<CrisisResource>,
}

impl CrisisInterventionSystem {
    /// Creates a system from an existing detector and engine config.
    pub fn new(detector: MoodDetector, config: &EngineConfig) -> Self {
        Self {
            detector,
            escalation: config.escalation,
            resources: config.resources.clone(),
        }
    }

    /// Creates a system using the given scorer and engine config.
    pub fn with_scorer(scorer: Arc<dyn SentimentScorer>, config: &EngineConfig) -> Self {
        Self::new(MoodDetector::new(scorer, config.confidence), config)
    }

    /// Creates a system using the built-in lexicon scorer.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_scorer(Arc::new(LexiconScorer::new()), config)
    }

    /// Creates a system with default configuration.
    pub fn with_defaults() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// The detector used for the underlying mood analysis.
    pub fn detector(&self) -> &MoodDetector {
        &self.detector
    }

    /// Assesses a message, optionally in light of the user's recent history.
    pub fn assess_crisis(
        &self,
        text: &str,
        user_context: Option<&UserCrisisContext>,
    ) -> CrisisAssessment {
        let mood_analysis = self.detector.detect_mood(text);
        let base_level = mood_analysis.crisis_level;
        let crisis_level = match user_context {
            Some(context) => self.escalate(base_level, context),
            None => base_level,
        };

        if crisis_level != base_level {
            tracing::info!(from = %base_level, to = %crisis_level, "Escalated crisis level from user history");
        }

        let requires_immediate_intervention = crisis_level.requires_immediate_intervention();
        if requires_immediate_intervention {
            tracing::warn!(
                crisis_level = %crisis_level,
                keywords = ?mood_analysis.crisis_keywords,
                "Message requires immediate intervention"
            );
        }

        CrisisAssessment {
            crisis_level,
            requires_immediate_intervention,
            intervention: self.plan_for(crisis_level),
            mood_analysis,
            timestamp: Utc::now(),
        }
    }

    /// Applies history-based escalation. Never lowers the level.
    pub fn escalate(&self, level: CrisisLevel, context: &UserCrisisContext) -> CrisisLevel {
        let mut level = level;
        if context.recent_crisis_flag_count > self.escalation.flag_count_threshold
            && level == CrisisLevel::Medium
        {
            level = CrisisLevel::High;
        }
        if context.risk_level == RiskLevel::High && level == CrisisLevel::Low {
            level = CrisisLevel::Medium;
        }
        level
    }

    /// Builds the intervention plan for a crisis level.
    pub fn plan_for(&self, level: CrisisLevel) -> InterventionPlan {
        let (actions, resource_count, message, follow_up_required) = match level {
            CrisisLevel::Critical => (CRITICAL_ACTIONS, self.resources.len(), CRISIS_MESSAGE, true),
            CrisisLevel::High => (HIGH_ACTIONS, 2, SUPPORTIVE_MESSAGE, true),
            CrisisLevel::Medium => (MEDIUM_ACTIONS, 1, ENCOURAGING_MESSAGE, false),
            CrisisLevel::Low | CrisisLevel::None => return InterventionPlan::none(level),
        };

        InterventionPlan {
            level,
            immediate_actions: actions.iter().map(|a| a.to_string()).collect(),
            resources: self.resources.iter().take(resource_count).cloned().collect(),
            de_escalation_message: message.to_string(),
            follow_up_required,
        }
    }
}

impl Default for CrisisInterventionSystem {
    fn default() -> Self {
        Self::with_defaults()
    }
}
