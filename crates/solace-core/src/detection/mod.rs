//! Mood and crisis detection for user messages.
//!
//! This module turns raw message text into a [`MoodAnalysis`]: lexical
//! sentiment, a tiered crisis level, an emotion profile and a single mood
//! label.

mod crisis;
mod detector;
mod emotion;
mod levels;
mod resolver;
mod sentiment;

pub use crisis::{
    detect_crisis_level, CrisisDetection, HIGH_RISK_PHRASES, MEDIUM_RISK_PHRASES, WARNING_SIGNS,
};
pub use detector::{MoodAnalysis, MoodDetector, POSITIVE_INDICATORS};
pub use emotion::{detect_emotions, Emotion, EmotionProfile};
pub use levels::{CrisisLevel, MoodState, RiskLevel};
pub use resolver::{calculate_confidence, resolve_mood_state, ConfidenceConfig};
pub use sentiment::{LexiconScorer, SentimentScore, SentimentScorer};
