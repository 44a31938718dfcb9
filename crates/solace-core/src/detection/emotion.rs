//! Keyword-category emotion profiling.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Emotions the profiler can detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Anxiety,
    Depression,
    Anger,
    Joy,
    Fear,
    Sadness,
    Disgust,
    Surprise,
}

impl Emotion {
    /// Returns all emotions.
    pub fn all() -> &'static [Emotion] {
        &[
            Emotion::Anxiety,
            Emotion::Depression,
            Emotion::Anger,
            Emotion::Joy,
            Emotion::Fear,
            Emotion::Sadness,
            Emotion::Disgust,
            Emotion::Surprise,
        ]
    }

    /// Emotions that count towards the negative-emotion sum.
    pub fn negative() -> &'static [Emotion] {
        &[
            Emotion::Anxiety,
            Emotion::Depression,
            Emotion::Anger,
            Emotion::Fear,
            Emotion::Sadness,
        ]
    }

    /// Returns the snake_case label for this emotion.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anxiety => "anxiety",
            Emotion::Depression => "depression",
            Emotion::Anger => "anger",
            Emotion::Joy => "joy",
            Emotion::Fear => "fear",
            Emotion::Sadness => "sadness",
            Emotion::Disgust => "disgust",
            Emotion::Surprise => "surprise",
        }
    }

    /// Keywords that signal this emotion.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Emotion::Anxiety => &[
                "anxious", "worried", "nervous", "panic", "stressed", "tense", "afraid", "fearful",
            ],
            Emotion::Depression => &[
                "sad", "depressed", "down", "hopeless", "empty", "numb", "worthless",
            ],
            Emotion::Anger => &[
                "angry", "furious", "irritated", "frustrated", "annoyed", "rage", "mad",
            ],
            Emotion::Joy => &[
                "happy", "joyful", "excited", "elated", "cheerful", "delighted", "pleased",
            ],
            Emotion::Fear => &[
                "scared", "terrified", "frightened", "alarmed", "horrified", "petrified",
            ],
            Emotion::Sadness => &[
                "sad", "upset", "disappointed", "hurt", "sorrowful", "miserable",
            ],
            Emotion::Disgust => &["disgusted", "revolted", "repulsed", "sickened", "nauseated"],
            Emotion::Surprise => &["surprised", "amazed", "astonished", "shocked", "stunned"],
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalised emotion weights for one message.
///
/// Only detected emotions are present. When anything was detected the
/// weights sum to 1.0.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionProfile(BTreeMap<Emotion, f64>);

impl EmotionProfile {
    /// Builds a profile from raw weights, keeping them as given.
    pub fn from_weights(weights: impl IntoIterator<Item = (Emotion, f64)>) -> Self {
        Self(weights.into_iter().collect())
    }

    /// Weight for an emotion, 0.0 when not detected.
    pub fn get(&self, emotion: Emotion) -> f64 {
        self.0.get(&emotion).copied().unwrap_or(0.0)
    }

    /// Returns true if no emotion was detected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of detected emotions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Anxiety + depression + anger + fear + sadness.
    pub fn negative_sum(&self) -> f64 {
        Emotion::negative().iter().map(|e| self.get(*e)).sum()
    }

    /// Joy plus half of surprise, which can be neutral.
    pub fn positive_sum(&self) -> f64 {
        self.get(Emotion::Joy) + self.get(Emotion::Surprise) * 0.5
    }

    /// The strongest detected emotion, if any.
    pub fn dominant(&self) -> Option<(Emotion, f64)> {
        self.0
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(e, w)| (*e, *w))
    }

    /// Iterates over detected emotions and their weights.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        self.0.iter().map(|(e, w)| (*e, *w))
    }
}

/// Earlier keywords score higher; the last character still scores 0.7.
const POSITION_FALLOFF: f64 = 0.3;

/// Scores each emotion category in lower-cased text and normalises the result.
pub fn detect_emotions(text: &str) -> EmotionProfile {
    let text_len = text.chars().count();
    if text_len == 0 {
        return EmotionProfile::default();
    }

    let mut raw = BTreeMap::new();
    for emotion in Emotion::all() {
        let keywords = emotion.keywords();
        let mut score = 0.0;
        let mut matched = 0usize;

        for keyword in keywords {
            if let Some(byte_idx) = text.find(keyword) {
                let position = text[..byte_idx].chars().count();
                score += 1.0 - (position as f64 / text_len as f64) * POSITION_FALLOFF;
                matched += 1;
            }
        }

        if matched > 0 {
            // Divide by the table size, not the match count.
            raw.insert(*emotion, (score / keywords.len() as f64).min(1.0));
        }
    }

    let total: f64 = raw.values().sum();
    if total > 0.0 {
        for weight in raw.values_mut() {
            *weight /= total;
        }
    }

    EmotionProfile(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn no_keywords_gives_empty_profile() {
        let profile = detect_emotions("just a regular tuesday");
        assert!(profile.is_empty());
        assert_eq!(profile.total(), 0.0);
        assert!(detect_emotions("").is_empty());
    }

    #[test]
    fn single_category_normalises_to_one() {
        let profile = detect_emotions("so angry");
        assert_eq!(profile.len(), 1);
        assert_close(profile.get(Emotion::Anger), 1.0);
    }

    #[test]
    fn weights_sum_to_one_when_detected() {
        for text in [
            "i'm happy but also a bit nervous and shocked",
            "sad, upset, scared and angry",
            "disgusted and furious",
        ] {
            let profile = detect_emotions(text);
            assert!(!profile.is_empty());
            assert_close(profile.total(), 1.0);
            assert!(profile.iter().all(|(_, w)| (0.0..=1.0).contains(&w)));
        }
    }

    #[test]
    fn raw_scores_use_position_and_table_size() {
        // "happy" at 0 → weight 1.0, joy table has 7 keywords.
        // "angry" at 10 of 15 chars → 1 - 10/15*0.3 = 0.8, anger table has 7.
        let text = "happy and angry";
        let profile = detect_emotions(text);
        let joy_raw = 1.0 / 7.0;
        let anger_raw = 0.8 / 7.0;
        let total = joy_raw + anger_raw;
        assert_close(profile.get(Emotion::Joy), joy_raw / total);
        assert_close(profile.get(Emotion::Anger), anger_raw / total);
    }

    #[test]
    fn shared_keyword_counts_for_both_categories() {
        // "sad" is listed under depression and sadness.
        let profile = detect_emotions("sad");
        assert_close(profile.get(Emotion::Depression), 0.5 * (6.0 / 7.0) / (0.5 * (6.0 / 7.0) + 0.5));
        assert!(profile.get(Emotion::Sadness) > profile.get(Emotion::Depression));
        assert_close(profile.total(), 1.0);
    }

    #[test]
    fn position_uses_characters_not_bytes() {
        let ascii = detect_emotions("aaaa happy and angry");
        let unicode = detect_emotions("éééé happy and angry");
        assert_close(ascii.get(Emotion::Joy), unicode.get(Emotion::Joy));
    }

    #[test]
    fn profile_helpers() {
        let profile = EmotionProfile::from_weights([
            (Emotion::Joy, 0.5),
            (Emotion::Surprise, 0.2),
            (Emotion::Anxiety, 0.3),
        ]);
        assert_close(profile.positive_sum(), 0.6);
        assert_close(profile.negative_sum(), 0.3);
        assert_eq!(profile.dominant(), Some((Emotion::Joy, 0.5)));
    }

    #[test]
    fn serializes_as_plain_map() {
        let profile = EmotionProfile::from_weights([(Emotion::Fear, 1.0)]);
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"{"fear":1.0}"#);
    }
}
