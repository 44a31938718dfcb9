//! Resolves sentiment, crisis level and emotions into one mood label.

use serde::{Deserialize, Serialize};

use super::{CrisisLevel, EmotionProfile, MoodState, SentimentScore};

/// Tuning for the confidence estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Neutral share above which confidence is damped.
    pub neutral_threshold: f64,
    /// Multiplier applied to confidence for mostly-neutral text.
    pub neutral_damping: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            neutral_threshold: 0.8,
            neutral_damping: 0.7,
        }
    }
}

/// Picks the mood label. The first matching rule wins.
pub fn resolve_mood_state(
    sentiment: &SentimentScore,
    crisis_level: CrisisLevel,
    emotions: &EmotionProfile,
) -> MoodState {
    if crisis_level == CrisisLevel::Critical {
        return MoodState::Crisis;
    }

    let compound = sentiment.compound;
    let negative = emotions.negative_sum();
    let positive = emotions.positive_sum();

    if matches!(crisis_level, CrisisLevel::High | CrisisLevel::Medium) {
        MoodState::VeryNegative
    } else if compound < -0.5 || negative > 0.7 {
        MoodState::VeryNegative
    } else if compound < -0.1 || negative > 0.5 {
        MoodState::Negative
    } else if compound > 0.5 || positive > 0.7 {
        MoodState::VeryPositive
    } else if compound > 0.1 || positive > 0.5 {
        MoodState::Positive
    } else {
        MoodState::Neutral
    }
}

/// Confidence in the mood label: the compound magnitude, damped for
/// mostly-neutral text and capped at 1.0.
pub fn calculate_confidence(sentiment: &SentimentScore, config: &ConfidenceConfig) -> f64 {
    let mut confidence = sentiment.compound.abs();
    if sentiment.neutral > config.neutral_threshold {
        confidence *= config.neutral_damping;
    }
    confidence.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Emotion;

    fn sentiment(compound: f64) -> SentimentScore {
        SentimentScore {
            compound,
            ..SentimentScore::neutral()
        }
    }

    fn none() -> EmotionProfile {
        EmotionProfile::default()
    }

    #[test]
    fn critical_overrides_everything() {
        let joyful = EmotionProfile::from_weights([(Emotion::Joy, 1.0)]);
        assert_eq!(
            resolve_mood_state(&sentiment(0.9), CrisisLevel::Critical, &joyful),
            MoodState::Crisis
        );
    }

    #[test]
    fn high_and_medium_are_very_negative() {
        for level in [CrisisLevel::High, CrisisLevel::Medium] {
            assert_eq!(
                resolve_mood_state(&sentiment(0.9), level, &none()),
                MoodState::VeryNegative
            );
        }
    }

    #[test]
    fn compound_thresholds() {
        let cases = [
            (-0.6, MoodState::VeryNegative),
            (-0.5, MoodState::Negative),
            (-0.2, MoodState::Negative),
            (-0.1, MoodState::Neutral),
            (0.0, MoodState::Neutral),
            (0.1, MoodState::Neutral),
            (0.3, MoodState::Positive),
            (0.5, MoodState::Positive),
            (0.6, MoodState::VeryPositive),
        ];
        for (compound, expected) in cases {
            assert_eq!(
                resolve_mood_state(&sentiment(compound), CrisisLevel::Low, &none()),
                expected,
                "compound {compound}"
            );
        }
    }

    #[test]
    fn emotion_sums_drive_mood_when_compound_is_flat() {
        let anxious = EmotionProfile::from_weights([(Emotion::Anxiety, 0.8), (Emotion::Joy, 0.2)]);
        assert_eq!(
            resolve_mood_state(&sentiment(0.0), CrisisLevel::None, &anxious),
            MoodState::VeryNegative
        );

        let mixed = EmotionProfile::from_weights([(Emotion::Sadness, 0.6), (Emotion::Joy, 0.4)]);
        assert_eq!(
            resolve_mood_state(&sentiment(0.0), CrisisLevel::None, &mixed),
            MoodState::Negative
        );

        let joyful = EmotionProfile::from_weights([(Emotion::Joy, 0.6), (Emotion::Surprise, 0.4)]);
        assert_eq!(
            resolve_mood_state(&sentiment(0.0), CrisisLevel::None, &joyful),
            MoodState::VeryPositive
        );

        let surprised = EmotionProfile::from_weights([(Emotion::Joy, 0.3), (Emotion::Surprise, 0.7)]);
        assert_eq!(
            resolve_mood_state(&sentiment(0.0), CrisisLevel::None, &surprised),
            MoodState::Positive
        );
    }

    #[test]
    fn negative_rules_come_before_positive() {
        let joyful = EmotionProfile::from_weights([(Emotion::Joy, 1.0)]);
        assert_eq!(
            resolve_mood_state(&sentiment(-0.3), CrisisLevel::None, &joyful),
            MoodState::Negative
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let profile = EmotionProfile::from_weights([(Emotion::Fear, 0.5), (Emotion::Joy, 0.5)]);
        let first = resolve_mood_state(&sentiment(0.2), CrisisLevel::Low, &profile);
        for _ in 0..10 {
            assert_eq!(
                resolve_mood_state(&sentiment(0.2), CrisisLevel::Low, &profile),
                first
            );
        }
    }

    #[test]
    fn confidence_is_damped_for_neutral_text() {
        let config = ConfidenceConfig::default();
        let neutral_heavy = SentimentScore {
            positive: 0.1,
            negative: 0.0,
            neutral: 0.9,
            compound: 0.5,
        };
        assert!((calculate_confidence(&neutral_heavy, &config) - 0.35).abs() < 1e-9);

        let expressive = SentimentScore {
            positive: 0.0,
            negative: 0.6,
            neutral: 0.4,
            compound: -0.8,
        };
        assert!((calculate_confidence(&expressive, &config) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn confidence_is_zero_for_zero_compound() {
        let config = ConfidenceConfig::default();
        assert_eq!(calculate_confidence(&SentimentScore::neutral(), &config), 0.0);
    }
}
