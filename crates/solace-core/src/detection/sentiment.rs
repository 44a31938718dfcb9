//! Lexical sentiment scoring.
//!
//! The engine consumes sentiment through the [`SentimentScorer`] capability so
//! detection can run against any backend. [`LexiconScorer`] is the built-in
//! implementation: a word-valence lexicon in the spirit of VADER, with
//! intensifiers, negation and compound normalisation.
//!
//! ## Scoring
//!
//! - Each lexicon word contributes `valence * weight * 4`, boosted by a
//!   preceding intensifier and flipped/dampened (×-0.7) within three tokens
//!   of a negation.
//! - `compound = sum / sqrt(sum² + 15)`.
//! - `positive`/`negative`/`neutral` are the proportions of positive mass,
//!   negative mass and neutral tokens.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ScorerError;

/// Normalisation constant for the compound score.
const COMPOUND_ALPHA: f64 = 15.0;

/// Lexicon valences are stored in [-1, 1]; scoring works on VADER's [-4, 4].
const VALENCE_SCALE: f64 = 4.0;

/// Negated sentiment is flipped and scaled by this factor.
const NEGATION_DAMPING: f64 = -0.7;

/// How many tokens a negation stays active for.
const NEGATION_WINDOW: usize = 3;

/// Polarity scores for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Share of positive sentiment (0.0 to 1.0).
    pub positive: f64,
    /// Share of negative sentiment (0.0 to 1.0).
    pub negative: f64,
    /// Share of neutral tokens (0.0 to 1.0).
    pub neutral: f64,
    /// Normalised overall polarity (-1.0 to 1.0).
    pub compound: f64,
}

impl SentimentScore {
    /// A fully neutral score with zero polarity.
    pub fn neutral() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound: 0.0,
        }
    }

    /// Checks that every component lies in its documented range.
    pub fn validate(self) -> Result<Self, ScorerError> {
        let shares = [self.positive, self.negative, self.neutral];
        if shares.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(ScorerError::OutOfRange(format!(
                "pos={} neg={} neu={}",
                self.positive, self.negative, self.neutral
            )));
        }
        if !(-1.0..=1.0).contains(&self.compound) {
            return Err(ScorerError::OutOfRange(format!(
                "compound={}",
                self.compound
            )));
        }
        Ok(self)
    }
}

/// Capability that turns raw text into polarity scores.
pub trait SentimentScorer: Send + Sync {
    /// Scores the given text.
    fn score_sentiment(&self, text: &str) -> Result<SentimentScore, ScorerError>;

    /// Returns the name of this scorer for logging.
    fn name(&self) -> &'static str;
}

/// Word entry in the sentiment lexicon.
#[derive(Debug, Clone, Copy)]
struct LexiconEntry {
    /// Valence (-1.0 to 1.0).
    valence: f64,
    /// Weight/importance of this word.
    weight: f64,
}

/// Lexicon tables shared by every scorer in the process.
struct Lexicon {
    words: HashMap<&'static str, LexiconEntry>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
    tokenizer: Regex,
}

static LEXICON: Lazy<Lexicon> = Lazy::new(Lexicon::load);

impl Lexicon {
    fn load() -> Self {
        let mut words = HashMap::new();
        for table in [
            DISTRESS_WORDS,
            CRISIS_WORDS,
            NEGATIVE_WORDS,
            POSITIVE_WORDS,
        ] {
            for &(word, valence, weight) in table {
                // Earlier tables are more specific; keep their entries.
                words
                    .entry(word)
                    .or_insert(LexiconEntry { valence, weight });
            }
        }

        Self {
            words,
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
            // Static pattern; cannot fail.
            tokenizer: Regex::new(r"[a-z0-9]+(?:'[a-z]+)?").expect("valid token pattern"),
        }
    }
}

/// Lexicon-based sentiment scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    /// Creates a scorer over the built-in lexicon.
    pub fn new() -> Self {
        // Force the tables now so the first request doesn't pay for it.
        Lazy::force(&LEXICON);
        Self
    }

    /// Scores text. Never fails; empty text is neutral.
    pub fn score(&self, text: &str) -> SentimentScore {
        let lexicon = &*LEXICON;
        let text_lower = text.to_lowercase();
        let tokens: Vec<&str> = lexicon
            .tokenizer
            .find_iter(&text_lower)
            .map(|m| m.as_str())
            .collect();

        if tokens.is_empty() {
            return SentimentScore::neutral();
        }

        let mut sum = 0.0;
        let mut positive_mass = 0.0;
        let mut negative_mass = 0.0;
        let mut neutral_count = 0usize;
        let mut negation_distance: Option<usize> = None;
        let mut pending_intensifier = 1.0;

        for token in &tokens {
            if lexicon.negations.contains(token) {
                negation_distance = Some(0);
                neutral_count += 1;
                continue;
            }

            if let Some(&boost) = lexicon.intensifiers.get(token) {
                pending_intensifier = boost;
                neutral_count += 1;
                continue;
            }

            match lexicon.words.get(token) {
                Some(entry) => {
                    let mut score = entry.valence * entry.weight * VALENCE_SCALE * pending_intensifier;
                    if negation_distance.is_some_and(|d| d < NEGATION_WINDOW) {
                        score *= NEGATION_DAMPING;
                    }

                    sum += score;
                    // VADER's +1 so a word counts even when weakly valenced.
                    if score > 0.0 {
                        positive_mass += score + 1.0;
                    } else if score < 0.0 {
                        negative_mass += score - 1.0;
                    } else {
                        neutral_count += 1;
                    }
                    pending_intensifier = 1.0;
                }
                None => neutral_count += 1,
            }

            if let Some(distance) = negation_distance.as_mut() {
                *distance += 1;
                if *distance >= NEGATION_WINDOW {
                    negation_distance = None;
                }
            }
        }

        let compound = normalize(sum);
        let total = positive_mass + negative_mass.abs() + neutral_count as f64;
        if total == 0.0 {
            return SentimentScore::neutral();
        }

        SentimentScore {
            positive: (positive_mass / total).abs(),
            negative: (negative_mass / total).abs(),
            neutral: neutral_count as f64 / total,
            compound,
        }
    }
}

impl SentimentScorer for LexiconScorer {
    fn score_sentiment(&self, text: &str) -> Result<SentimentScore, ScorerError> {
        Ok(self.score(text))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

fn normalize(sum: f64) -> f64 {
    if sum == 0.0 {
        return 0.0;
    }
    (sum / (sum * sum + COMPOUND_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("absolutely", 1.5),
    ("totally", 1.3),
    ("so", 1.2),
    ("incredibly", 1.4),
    ("terribly", 1.4),
    ("deeply", 1.3),
    ("always", 1.2),
    ("completely", 1.4),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nowhere", "cannot", "can't",
    "don't", "doesn't", "didn't", "won't", "wouldn't", "couldn't", "shouldn't", "isn't",
    "aren't", "wasn't", "weren't", "haven't", "hasn't", "hadn't",
];

// (word, valence, weight)
const DISTRESS_WORDS: &[(&str, f64, f64)] = &[
    ("sad", -0.7, 1.0),
    ("depressed", -0.9, 1.2),
    ("lonely", -0.8, 1.1),
    ("alone", -0.6, 1.0),
    ("hopeless", -0.9, 1.2),
    ("worthless", -0.9, 1.2),
    ("helpless", -0.8, 1.1),
    ("miserable", -0.8, 1.1),
    ("empty", -0.6, 0.9),
    ("numb", -0.5, 0.8),
    ("anxious", -0.7, 1.0),
    ("worried", -0.5, 0.8),
    ("nervous", -0.5, 0.8),
    ("stressed", -0.6, 0.9),
    ("scared", -0.6, 0.9),
    ("afraid", -0.6, 0.9),
    ("terrified", -0.8, 1.1),
    ("panic", -0.7, 1.0),
    ("crying", -0.6, 1.0),
    ("heartbroken", -0.8, 1.1),
    ("devastated", -0.9, 1.2),
    ("exhausted", -0.5, 0.8),
    ("overwhelmed", -0.7, 1.0),
    ("struggling", -0.6, 0.9),
    ("suffering", -0.8, 1.1),
    ("pain", -0.6, 0.9),
    ("hurt", -0.6, 0.9),
    ("broken", -0.7, 1.0),
    ("lost", -0.5, 0.8),
    ("trapped", -0.7, 1.0),
    ("failure", -0.7, 1.0),
    ("rejected", -0.7, 1.0),
    ("abandoned", -0.8, 1.1),
    ("unbearable", -0.8, 1.1),
];

const CRISIS_WORDS: &[(&str, f64, f64)] = &[
    ("suicide", -1.0, 1.5),
    ("suicidal", -1.0, 1.5),
    ("die", -0.8, 1.2),
    ("dying", -0.8, 1.2),
    ("dead", -0.7, 1.0),
    ("kill", -0.9, 1.3),
    ("harm", -0.7, 1.0),
    ("burden", -0.7, 1.1),
    ("overdose", -0.9, 1.4),
];

const NEGATIVE_WORDS: &[(&str, f64, f64)] = &[
    ("hate", -0.8, 1.0),
    ("angry", -0.7, 0.9),
    ("furious", -0.9, 1.1),
    ("rage", -0.8, 1.0),
    ("annoyed", -0.5, 0.7),
    ("frustrated", -0.6, 0.8),
    ("irritated", -0.5, 0.7),
    ("mad", -0.6, 0.8),
    ("upset", -0.6, 0.8),
    ("disappointed", -0.6, 0.8),
    ("disgusted", -0.7, 0.9),
    ("terrible", -0.7, 0.9),
    ("awful", -0.7, 0.9),
    ("horrible", -0.8, 1.0),
    ("worst", -0.8, 1.0),
    ("bad", -0.5, 0.7),
    ("useless", -0.7, 0.9),
    ("sick", -0.4, 0.6),
    ("tired", -0.3, 0.5),
];

const POSITIVE_WORDS: &[(&str, f64, f64)] = &[
    ("happy", 0.8, 1.0),
    ("joy", 0.9, 1.1),
    ("joyful", 0.9, 1.1),
    ("love", 0.8, 1.0),
    ("great", 0.7, 0.9),
    ("good", 0.6, 0.8),
    ("better", 0.5, 0.8),
    ("improved", 0.5, 0.8),
    ("wonderful", 0.8, 1.0),
    ("amazing", 0.8, 1.0),
    ("awesome", 0.8, 1.0),
    ("excellent", 0.8, 1.0),
    ("fantastic", 0.8, 1.0),
    ("beautiful", 0.7, 0.9),
    ("nice", 0.5, 0.7),
    ("kind", 0.6, 0.8),
    ("fun", 0.6, 0.8),
    ("excited", 0.7, 0.9),
    ("cheerful", 0.7, 0.9),
    ("delighted", 0.8, 1.0),
    ("pleased", 0.6, 0.8),
    ("proud", 0.7, 0.9),
    ("confident", 0.6, 0.8),
    ("calm", 0.5, 0.7),
    ("peaceful", 0.6, 0.8),
    ("grateful", 0.7, 0.9),
    ("thankful", 0.7, 0.9),
    ("hopeful", 0.6, 0.8),
    ("motivated", 0.6, 0.8),
    ("content", 0.4, 0.7),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> LexiconScorer {
        LexiconScorer::new()
    }

    #[test]
    fn empty_text_is_neutral() {
        let score = scorer().score("");
        assert_eq!(score, SentimentScore::neutral());
        assert_eq!(scorer().score("   ...  "), SentimentScore::neutral());
    }

    #[test]
    fn text_without_lexicon_words_has_zero_compound() {
        let score = scorer().score("The weather today is fine");
        assert_eq!(score.compound, 0.0);
        assert_eq!(score.neutral, 1.0);
    }

    #[test]
    fn positive_text() {
        let score = scorer().score("I am so happy and excited about this wonderful day");
        assert!(score.compound > 0.5);
        assert!(score.positive > score.negative);
    }

    #[test]
    fn negative_text() {
        let score = scorer().score("Everything is terrible and horrible and awful");
        assert!(score.compound < -0.5);
        assert!(score.negative > score.positive);
    }

    #[test]
    fn negation_reduces_negative_sentiment() {
        let sad = scorer().score("I am sad");
        let not_sad = scorer().score("I am not sad");
        assert!(
            not_sad.compound > sad.compound,
            "Negation should reduce negative sentiment"
        );
    }

    #[test]
    fn intensifier_increases_magnitude() {
        let sad = scorer().score("I am sad");
        let very_sad = scorer().score("I am very sad");
        assert!(
            very_sad.compound < sad.compound,
            "Intensifier should increase sentiment magnitude"
        );
    }

    #[test]
    fn shares_are_proportions() {
        let score = scorer().score("I feel happy but also a little sad and tired");
        let total = score.positive + score.negative + score.neutral;
        assert!((total - 1.0).abs() < 1e-9);
        assert!(score.validate().is_ok());
    }

    #[test]
    fn case_and_punctuation_are_ignored() {
        let plain = scorer().score("i am happy");
        let shouted = scorer().score("I AM HAPPY!!!");
        assert_eq!(plain, shouted);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let bad = SentimentScore {
            compound: 1.5,
            ..SentimentScore::neutral()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_performance() {
        let s = scorer();
        let start = std::time::Instant::now();

        for _ in 0..100 {
            s.score("This is a test sentence with some emotional content about feeling sad and lonely");
        }

        let avg_us = start.elapsed().as_micros() / 100;
        assert!(
            avg_us < 10000,
            "Average scoring time {}us exceeds 10ms target",
            avg_us
        );
    }
}
