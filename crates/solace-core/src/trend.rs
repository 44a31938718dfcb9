//! Mood progression over a user's stored history.
//!
//! Labels are mapped onto a fixed scale (very_positive = 2 down to
//! crisis = -3, unknown = 0). The trend compares the mean of the last three
//! entries against the mean of everything before them.

use serde::{Deserialize, Serialize};

use crate::detection::{MoodAnalysis, MoodState};
use crate::error::TrendError;

/// Number of most recent entries averaged for the current trend.
const RECENT_WINDOW: usize = 3;

/// Difference in averages beyond which the trend is not stable.
const TREND_THRESHOLD: f64 = 0.5;

/// Direction of a user's mood, or why it could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
    /// Fewer than two entries.
    #[default]
    InsufficientData,
    /// Statistics could not be computed; see `MoodTrendReport::error`.
    Error,
}

impl MoodTrend {
    /// Returns true for the sentinel values that are not a real trend.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, MoodTrend::InsufficientData | MoodTrend::Error)
    }
}

/// Trend and volatility statistics for a mood history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MoodTrendReport {
    pub trend: MoodTrend,
    /// Recent average minus older average.
    pub trend_value: f64,
    /// Mean absolute change between consecutive entries.
    pub volatility: f64,
    /// Scale value of the newest entry.
    pub current_mood: i32,
    pub average_mood: f64,
    /// Highest minus lowest scale value.
    pub mood_range: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MoodTrendReport {
    /// Report for a history too short to analyze.
    pub fn insufficient_data() -> Self {
        Self::default()
    }

    /// Report for a history whose statistics could not be computed.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            trend: MoodTrend::Error,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Maps a stored mood label onto the trend scale. Unknown labels are 0.
pub fn mood_value(label: &str) -> i32 {
    MoodState::from_label(label).map_or(0, |state| state.numeric())
}

/// Analyzes mood labels ordered oldest to newest.
pub fn analyze_mood_progression<S: AsRef<str>>(history: &[S]) -> MoodTrendReport {
    let values: Vec<i32> = history.iter().map(|label| mood_value(label.as_ref())).collect();
    analyze_values(&values)
}

/// Analyzes stored analyses ordered oldest to newest.
pub fn analyze_analyses(history: &[MoodAnalysis]) -> MoodTrendReport {
    let values: Vec<i32> = history.iter().map(|a| a.mood_state.numeric()).collect();
    analyze_values(&values)
}

fn analyze_values(values: &[i32]) -> MoodTrendReport {
    if values.len() < 2 {
        return MoodTrendReport::insufficient_data();
    }

    match compute(values) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Mood progression analysis error: {}", e);
            MoodTrendReport::error(e.to_string())
        }
    }
}

fn compute(values: &[i32]) -> Result<MoodTrendReport, TrendError> {
    let split = values.len().saturating_sub(RECENT_WINDOW);
    let (older, recent) = values.split_at(split);

    let recent_avg = sum(recent) / recent.len() as f64;
    // An empty older window averages to 0 rather than being skipped.
    let older_avg = sum(older) / older.len().max(1) as f64;
    let trend_value = finite(recent_avg - older_avg, "trend value")?;

    let trend = if trend_value > TREND_THRESHOLD {
        MoodTrend::Improving
    } else if trend_value < -TREND_THRESHOLD {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    };

    let changes: Vec<i32> = values.windows(2).map(|w| (w[1] - w[0]).abs()).collect();
    let volatility = finite(sum(&changes) / changes.len() as f64, "volatility")?;
    let average_mood = finite(sum(values) / values.len() as f64, "average")?;

    let max = values.iter().copied().max().unwrap_or(0);
    let min = values.iter().copied().min().unwrap_or(0);

    Ok(MoodTrendReport {
        trend,
        trend_value,
        volatility,
        current_mood: values.last().copied().unwrap_or(0),
        average_mood,
        mood_range: max - min,
        error: None,
    })
}

fn sum(values: &[i32]) -> f64 {
    values.iter().map(|v| f64::from(*v)).sum()
}

fn finite(value: f64, what: &'static str) -> Result<f64, TrendError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TrendError::NonFinite(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn short_history_is_insufficient() {
        let empty: [&str; 0] = [];
        assert_eq!(analyze_mood_progression(&empty).trend, MoodTrend::InsufficientData);
        assert_eq!(
            analyze_mood_progression(&["positive"]).trend,
            MoodTrend::InsufficientData
        );
        assert!(MoodTrend::InsufficientData.is_sentinel());
    }

    #[test]
    fn declining_history() {
        let report =
            analyze_mood_progression(&["positive", "positive", "negative", "very_negative"]);
        assert_eq!(report.trend, MoodTrend::Declining);
        // recent = (1 - 1 - 2) / 3, older = 1 / 1
        assert_close(report.trend_value, -2.0 / 3.0 - 1.0);
        assert_close(report.volatility, (0.0 + 2.0 + 1.0) / 3.0);
        assert_eq!(report.current_mood, -2);
        assert_close(report.average_mood, -0.25);
        assert_eq!(report.mood_range, 3);
        assert!(report.error.is_none());
    }

    #[test]
    fn improving_history() {
        let report = analyze_mood_progression(&[
            "crisis",
            "very_negative",
            "negative",
            "neutral",
            "positive",
            "very_positive",
        ]);
        assert_eq!(report.trend, MoodTrend::Improving);
        assert_close(report.trend_value, 1.0 - (-2.0));
        assert_close(report.volatility, 1.0);
        assert_eq!(report.mood_range, 5);
    }

    #[test]
    fn short_history_compares_against_zero() {
        // With three or fewer entries the older window is empty and averages 0.
        let report = analyze_mood_progression(&["positive", "very_positive"]);
        assert_eq!(report.trend, MoodTrend::Improving);
        assert_close(report.trend_value, 1.5);

        let report = analyze_mood_progression(&["negative", "neutral", "neutral"]);
        assert_eq!(report.trend, MoodTrend::Stable);
        assert_close(report.trend_value, -1.0 / 3.0);
    }

    #[test]
    fn stable_history() {
        let report =
            analyze_mood_progression(&["neutral", "neutral", "positive", "neutral", "neutral"]);
        assert_eq!(report.trend, MoodTrend::Stable);
        assert_close(report.trend_value, 1.0 / 3.0);
        assert_close(report.volatility, 0.5);
    }

    #[test]
    fn unknown_labels_count_as_neutral() {
        assert_eq!(mood_value("ecstatic"), 0);
        let report = analyze_mood_progression(&["ecstatic", "???"]);
        assert_eq!(report.trend, MoodTrend::Stable);
        assert_eq!(report.current_mood, 0);
        assert_eq!(report.mood_range, 0);
    }

    #[test]
    fn accepts_owned_strings() {
        let history: Vec<String> = vec!["very_negative".into(), "negative".into()];
        let report = analyze_mood_progression(&history);
        assert_eq!(report.current_mood, -1);
    }

    #[test]
    fn analyses_use_their_mood_state() {
        let history: Vec<MoodAnalysis> = [
            MoodState::VeryPositive,
            MoodState::VeryPositive,
            MoodState::VeryPositive,
            MoodState::Crisis,
        ]
        .into_iter()
        .map(|state| MoodAnalysis {
            mood_state: state,
            ..MoodAnalysis::neutral()
        })
        .collect();

        let report = analyze_analyses(&history);
        assert_eq!(report.trend, MoodTrend::Declining);
        assert_eq!(report.mood_range, 5);
    }

    #[test]
    fn error_report_carries_description() {
        let report = MoodTrendReport::error("boom");
        assert_eq!(report.trend, MoodTrend::Error);
        assert!(report.trend.is_sentinel());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["trend"], "error");
        assert_eq!(json["error"], "boom");
    }

    #[test]
    fn finite_guard_rejects_nan() {
        assert!(finite(f64::NAN, "average").is_err());
        assert!(finite(f64::INFINITY, "average").is_err());
        assert_eq!(finite(1.5, "average").unwrap(), 1.5);
    }
}
