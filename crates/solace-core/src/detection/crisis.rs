//! Tiered crisis keyword classifier.
//!
//! Three phrase lists are checked in order and the first tier that matches
//! decides the level:
//!
//! 1. High-risk phrases: any match is `critical`.
//! 2. Medium-risk phrases: two or more is `high`, one is `medium`.
//! 3. Warning signs: three or more is `medium`, one or two is `low`.
//!
//! Matching is plain substring containment on lower-cased text.

use super::CrisisLevel;

/// Phrases that indicate immediate danger.
pub const HIGH_RISK_PHRASES: &[&str] = &[
    "kill myself",
    "suicide",
    "end my life",
    "not worth living",
    "better off dead",
    "want to die",
    "no point in living",
    "end it all",
    "overdose",
    "jump off",
    "hang myself",
    "cut myself",
    "self harm",
    "hurt myself",
];

/// Phrases that indicate serious distress.
pub const MEDIUM_RISK_PHRASES: &[&str] = &[
    "hopeless",
    "worthless",
    "can't go on",
    "give up",
    "no hope",
    "hate myself",
    "hate my life",
    "unbearable",
    "can't take it",
    "falling apart",
    "breaking down",
];

/// Words that are concerning in combination.
pub const WARNING_SIGNS: &[&str] = &[
    "depressed",
    "anxious",
    "panic",
    "scared",
    "alone",
    "isolated",
    "nobody cares",
    "burden",
    "trapped",
    "overwhelmed",
    "exhausted",
    "numb",
    "empty",
];

/// Crisis level for a message and the phrases that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrisisDetection {
    pub level: CrisisLevel,
    pub keywords: Vec<String>,
}

/// Classifies lower-cased text into a crisis level.
pub fn detect_crisis_level(text: &str) -> CrisisDetection {
    let high_risk = matching(text, HIGH_RISK_PHRASES);
    if !high_risk.is_empty() {
        return CrisisDetection {
            level: CrisisLevel::Critical,
            keywords: high_risk,
        };
    }

    let medium_risk = matching(text, MEDIUM_RISK_PHRASES);
    match medium_risk.len() {
        0 => {}
        1 => {
            return CrisisDetection {
                level: CrisisLevel::Medium,
                keywords: medium_risk,
            }
        }
        _ => {
            return CrisisDetection {
                level: CrisisLevel::High,
                keywords: medium_risk,
            }
        }
    }

    let warnings = matching(text, WARNING_SIGNS);
    let level = match warnings.len() {
        0 => CrisisLevel::None,
        1 | 2 => CrisisLevel::Low,
        _ => CrisisLevel::Medium,
    };

    CrisisDetection {
        level,
        keywords: warnings,
    }
}

/// Returns every phrase in `phrases` contained in `text`, in table order.
pub(crate) fn matching(text: &str, phrases: &[&str]) -> Vec<String> {
    phrases
        .iter()
        .filter(|phrase| text.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect()
}
