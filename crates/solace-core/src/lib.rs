//! Solace Core - mood detection, crisis assessment and intervention selection.
//!
//! The engine is pure and synchronous: every entry point takes text (and,
//! for crisis assessment, a small user-history summary) and returns a value
//! the caller can store or forward. Nothing here touches the network, the
//! filesystem (except [`EngineConfig::from_json_file`]) or a database.
//!
//! - [`MoodDetector::detect_mood`] analyzes one message.
//! - [`analyze_mood_progression`] summarizes a stored mood history.
//! - [`CrisisInterventionSystem::assess_crisis`] escalates and picks an
//!   intervention.

pub mod config;
pub mod detection;
pub mod error;
pub mod intervention;
pub mod responder;
pub mod trend;

pub use config::{EngineConfig, EscalationConfig};
pub use detection::{
    CrisisLevel, Emotion, EmotionProfile, LexiconScorer, MoodAnalysis, MoodDetector, MoodState,
    RiskLevel, SentimentScore, SentimentScorer,
};
pub use error::{ConfigError, GenerationError, ScorerError};
pub use intervention::{
    CrisisAssessment, CrisisInterventionSystem, CrisisResource, InterventionPlan,
    UserCrisisContext,
};
pub use responder::{SupportReply, SupportRequest, SupportResponder, TextGenerator};
pub use trend::{analyze_analyses, analyze_mood_progression, MoodTrend, MoodTrendReport};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_types_are_thread_safe() {
        assert_send_sync::<MoodDetector>();
        assert_send_sync::<CrisisInterventionSystem>();
        assert_send_sync::<SupportResponder>();
    }

    #[test]
    fn end_to_end_history() {
        let system = CrisisInterventionSystem::with_defaults();
        let messages = [
            "I'm feeling happy and grateful today",
            "work was okay",
            "I feel sad and worried",
            "everything is hopeless and I want to give up",
        ];

        let history: Vec<MoodAnalysis> = messages
            .iter()
            .map(|m| system.assess_crisis(m, None).mood_analysis)
            .collect();

        let report = analyze_analyses(&history);
        assert_eq!(report.trend, MoodTrend::Declining);
        assert_eq!(report.current_mood, MoodState::VeryNegative.numeric());
    }
}
