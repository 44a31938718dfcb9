//! Mood detection pipeline.
//!
//! Runs the sentiment scorer, crisis classifier and emotion profiler over one
//! message and resolves them into a [`MoodAnalysis`].

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::crisis::{detect_crisis_level, matching};
use super::emotion::detect_emotions;
use super::resolver::{calculate_confidence, resolve_mood_state, ConfidenceConfig};
use super::{
    CrisisLevel, EmotionProfile, LexiconScorer, MoodState, SentimentScore, SentimentScorer,
};

/// Words that signal recovery or wellbeing.
pub const POSITIVE_INDICATORS: &[&str] = &[
    "better",
    "improved",
    "happy",
    "grateful",
    "hopeful",
    "excited",
    "proud",
    "accomplished",
    "peaceful",
    "calm",
    "confident",
    "motivated",
    "energized",
    "blessed",
    "content",
];

/// Everything the engine concluded about one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    pub mood_state: MoodState,
    pub sentiment: SentimentScore,
    pub emotions: EmotionProfile,
    pub crisis_level: CrisisLevel,
    /// Crisis phrases that decided `crisis_level`.
    pub crisis_keywords: Vec<String>,
    pub positive_indicators: Vec<String>,
    /// Confidence in `mood_state` (0.0 to 1.0).
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    /// Set when the sentiment scorer failed and a neutral score was used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MoodAnalysis {
    /// A neutral, zero-confidence analysis.
    pub fn neutral() -> Self {
        Self {
            mood_state: MoodState::Neutral,
            sentiment: SentimentScore::neutral(),
            emotions: EmotionProfile::default(),
            crisis_level: CrisisLevel::None,
            crisis_keywords: Vec::new(),
            positive_indicators: Vec::new(),
            confidence: 0.0,
            timestamp: Utc::now(),
            error: None,
        }
    }

    /// Returns true if the analysis was produced without a working scorer.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Detects mood and crisis indicators in user messages.
///
/// Holds no mutable state; share it behind an `Arc` across request handlers.
#[derive(Clone)]
pub struct MoodDetector {
    scorer: Arc<dyn SentimentScorer>,
    confidence: ConfidenceConfig,
}

impl fmt::Debug for MoodDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoodDetector")
            .field("scorer", &self.scorer.name())
            .field("confidence", &self.confidence)
            .finish()
    }
}

impl MoodDetector {
    /// Creates a detector backed by the given scorer.
    pub fn new(scorer: Arc<dyn SentimentScorer>, confidence: ConfidenceConfig) -> Self {
        Self { scorer, confidence }
    }

    /// Creates a detector using the built-in lexicon scorer.
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(LexiconScorer::new()), ConfidenceConfig::default())
    }

    /// Analyzes a single message.
    ///
    /// Never fails: empty text yields a neutral analysis, and a failing scorer
    /// degrades to a neutral sentiment with `error` set while crisis and
    /// emotion detection still run.
    pub fn detect_mood(&self, text: &str) -> MoodAnalysis {
        let text_lower = text.trim().to_lowercase();
        if text_lower.is_empty() {
            return MoodAnalysis::neutral();
        }

        let (sentiment, error) = match self
            .scorer
            .score_sentiment(text)
            .and_then(SentimentScore::validate)
        {
            Ok(score) => (score, None),
            Err(e) => {
                tracing::error!(scorer = self.scorer.name(), "Mood detection error: {}", e);
                (SentimentScore::neutral(), Some(e.to_string()))
            }
        };

        let crisis = detect_crisis_level(&text_lower);
        let emotions = detect_emotions(&text_lower);
        let mood_state = resolve_mood_state(&sentiment, crisis.level, &emotions);
        let positive_indicators = matching(&text_lower, POSITIVE_INDICATORS);
        let confidence = calculate_confidence(&sentiment, &self.confidence);

        tracing::debug!(
            mood = %mood_state,
            crisis_level = %crisis.level,
            compound = sentiment.compound,
            emotions = emotions.len(),
            "Analyzed message"
        );

        MoodAnalysis {
            mood_state,
            sentiment,
            emotions,
            crisis_level: crisis.level,
            crisis_keywords: crisis.keywords,
            positive_indicators,
            confidence,
            timestamp: Utc::now(),
            error,
        }
    }
}

impl Default for MoodDetector {
    fn default() -> Self {
        Self::with_defaults()
    }
}
