//! Summaries of the conditions a user rates highly.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use swellmind_core::{TimeOfDay, TrainingSample, WindOrientation};

/// Linked sessions required before insights are produced.
pub const MIN_INSIGHT_SESSIONS: usize = 3;

/// Ratings at or above this value mark a good session.
pub const GOOD_SESSION_RATING: u8 = 7;

/// Crowd tolerance reported until it can be derived from sessions.
pub const DEFAULT_CROWD_TOLERANCE: u8 = 5;

const DEFAULT_WAVE_HEIGHT: f64 = 1.5;
const DEFAULT_WAVE_PERIOD: f64 = 10.0;
const WAVE_HEIGHT_SPREAD: f64 = 0.5;
const WAVE_HEIGHT_FLOOR: f64 = 0.5;
const WAVE_PERIOD_SPREAD: f64 = 2.0;
const WAVE_PERIOD_FLOOR: f64 = 6.0;

/// How much the user's model can be trusted, by session count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelConfidence {
    /// Fewer than 8 sessions.
    Low,
    /// 8 to 14 sessions.
    Medium,
    /// 15 sessions or more.
    High,
}

impl ModelConfidence {
    /// Classify a session count.
    #[must_use]
    pub const fn for_session_count(count: usize) -> Self {
        match count {
            15.. => Self::High,
            8..=14 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Return the confidence level as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ModelConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The conditions a user's good sessions have in common.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInsights {
    /// Lower bound of the ideal wave height, in metres.
    pub ideal_wave_height_min: f64,
    /// Upper bound of the ideal wave height, in metres.
    pub ideal_wave_height_max: f64,
    /// Lower bound of the ideal wave period, in seconds.
    pub ideal_wave_period_min: f64,
    /// Upper bound of the ideal wave period, in seconds.
    pub ideal_wave_period_max: f64,
    /// Most common wind orientation in good sessions.
    pub preferred_wind: WindOrientation,
    /// Most common time of day in good sessions.
    pub preferred_time_of_day: TimeOfDay,
    /// Crowd tolerance; currently always [`DEFAULT_CROWD_TOLERANCE`].
    pub crowd_tolerance: u8,
    /// Number of linked sessions considered.
    pub total_sessions: usize,
    /// Mean rating over every linked session, to one decimal place.
    pub avg_rating: f64,
    /// Confidence implied by `total_sessions`.
    pub model_confidence: ModelConfidence,
}

/// Summarise a user's linked sessions.
///
/// Returns `None` with fewer than [`MIN_INSIGHT_SESSIONS`] samples or when no
/// sample is rated [`GOOD_SESSION_RATING`] or higher. Preferred orientation
/// and time of day are the most common values among good sessions; ties go
/// to the value seen first.
///
/// # Examples
/// ```
/// use swellmind_core::test_support::alternating_samples;
/// use swellmind_insights::{ModelConfidence, calculate_insights};
///
/// assert!(calculate_insights(&alternating_samples(2)).is_none());
///
/// let insights = calculate_insights(&alternating_samples(4)).unwrap();
/// assert_eq!(insights.avg_rating, 6.0);
/// assert_eq!(insights.model_confidence, ModelConfidence::Low);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "range bounds around averages")]
pub fn calculate_insights(samples: &[TrainingSample]) -> Option<UserInsights> {
    if samples.len() < MIN_INSIGHT_SESSIONS {
        return None;
    }
    let good: Vec<&TrainingSample> = samples
        .iter()
        .filter(|sample| sample.rating.get() >= GOOD_SESSION_RATING)
        .collect();
    if good.is_empty() {
        return None;
    }

    let height = mean(good.iter().filter_map(|s| s.forecast.measured_wave_height()))
        .unwrap_or(DEFAULT_WAVE_HEIGHT);
    let period = mean(good.iter().filter_map(|s| s.forecast.measured_wave_period()))
        .unwrap_or(DEFAULT_WAVE_PERIOD);
    let preferred_wind = mode(good.iter().filter_map(|s| s.forecast.wind_orientation))
        .unwrap_or(WindOrientation::Offshore);
    let preferred_time_of_day =
        mode(good.iter().map(|s| s.forecast.time_of_day())).unwrap_or(TimeOfDay::Morning);
    let avg_rating = mean(samples.iter().map(|s| s.rating.as_f64())).unwrap_or_default();

    Some(UserInsights {
        ideal_wave_height_min: (height - WAVE_HEIGHT_SPREAD).max(WAVE_HEIGHT_FLOOR),
        ideal_wave_height_max: height + WAVE_HEIGHT_SPREAD,
        ideal_wave_period_min: (period - WAVE_PERIOD_SPREAD).max(WAVE_PERIOD_FLOOR),
        ideal_wave_period_max: period + WAVE_PERIOD_SPREAD,
        preferred_wind,
        preferred_time_of_day,
        crowd_tolerance: DEFAULT_CROWD_TOLERANCE,
        total_sessions: samples.len(),
        avg_rating: round_to_tenth(avg_rating),
        model_confidence: ModelConfidence::for_session_count(samples.len()),
    })
}

/// Arithmetic mean, `None` when there are no values.
#[expect(clippy::float_arithmetic, reason = "averaging")]
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (total, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, n), value| (sum + value, n + 1));
    (count > 0).then(|| total / count_as_f64(count))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "session counts stay far below 2^52"
)]
pub(crate) const fn count_as_f64(count: usize) -> f64 {
    count as f64
}

#[expect(clippy::float_arithmetic, reason = "decimal rounding")]
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Most frequent value; the first value seen wins ties.
fn mode<T: Copy + Ord>(values: impl IntoIterator<Item = T>) -> Option<T> {
    let mut tallies: BTreeMap<T, (usize, usize)> = BTreeMap::new();
    for (position, value) in values.into_iter().enumerate() {
        tallies.entry(value).or_insert((position, 0)).1 += 1;
    }
    tallies
        .into_iter()
        .min_by_key(|&(_, (first_seen, count))| (Reverse(count), first_seen))
        .map(|(value, _)| value)
}
