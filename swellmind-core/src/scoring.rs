//! Score forecast windows for a user.
//!
//! The [`Scorer`] trait turns a [`ForecastObservation`] and the user's
//! [`UserPreferences`] into a [`ScoringResult`]: a 0–100 score, a short
//! explanation and a recommendation flag.

use crate::{ForecastObservation, UserPreferences};

/// Scores at or above this value are recommended.
pub const RECOMMENDATION_THRESHOLD: u8 = 75;

/// Outcome of scoring one forecast window.
///
/// The recommendation flag is derived from the score on construction, so the
/// two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoringResult {
    score: u8,
    explanation: String,
    is_recommended: bool,
}

impl ScoringResult {
    /// Build a result, clamping the score to `0..=100`.
    ///
    /// # Examples
    /// ```
    /// use swellmind_core::ScoringResult;
    ///
    /// let result = ScoringResult::new(80, "Offshore winds");
    /// assert!(result.is_recommended());
    /// assert!(!ScoringResult::new(74, "Onshore winds").is_recommended());
    /// ```
    #[must_use]
    pub fn new(score: u8, explanation: impl Into<String>) -> Self {
        let bounded = score.min(100);
        Self {
            score: bounded,
            explanation: explanation.into(),
            is_recommended: bounded >= RECOMMENDATION_THRESHOLD,
        }
    }

    /// Suitability score in `0..=100`.
    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    /// Human-readable reasoning behind the score.
    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Whether the window is worth surfing.
    #[must_use]
    pub const fn is_recommended(&self) -> bool {
        self.is_recommended
    }
}

/// Round a raw score to the nearest integer in `0..=100`.
///
/// Halves round away from zero, which on the non-negative score domain is
/// round-half-up. Non-finite input yields `0`.
#[must_use]
pub fn round_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Calculate a suitability score for a forecast window.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so one scorer can
/// serve many requests. Scoring is infallible: missing measurements fall
/// back to neutral values instead of producing errors.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use swellmind_core::{ForecastObservation, Scorer, ScoringResult, UserPreferences};
///
/// struct FlatScorer;
///
/// impl Scorer for FlatScorer {
///     fn score(&self, _forecast: &ForecastObservation, _prefs: &UserPreferences) -> ScoringResult {
///         ScoringResult::new(Self::sanitise(49.5), "Flat")
///     }
/// }
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
/// let result = FlatScorer.score(&ForecastObservation::at(at), &UserPreferences::default());
/// assert_eq!(result.score(), 50);
/// ```
pub trait Scorer: Send + Sync {
    /// Score `forecast` against `preferences`.
    fn score(&self, forecast: &ForecastObservation, preferences: &UserPreferences)
    -> ScoringResult;

    /// Round and clamp a raw score into `0..=100`.
    fn sanitise(raw: f64) -> u8
    where
        Self: Sized,
    {
        round_score(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN, 0)]
    #[case(f64::INFINITY, 0)]
    #[case(-3.0, 0)]
    #[case(98.5, 99)]
    #[case(74.49, 74)]
    #[case(120.0, 100)]
    fn rounding_clamps_and_filters(#[case] raw: f64, #[case] expected: u8) {
        assert_eq!(round_score(raw), expected);
    }

    #[rstest]
    #[case(74, false)]
    #[case(75, true)]
    #[case(100, true)]
    fn recommendation_threshold(#[case] score: u8, #[case] expected: bool) {
        assert_eq!(ScoringResult::new(score, "x").is_recommended(), expected);
    }

    #[rstest]
    fn scores_above_one_hundred_are_clamped() {
        assert_eq!(ScoringResult::new(250, "x").score(), 100);
    }
}
