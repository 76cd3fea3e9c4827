//! Scoring with a user's trained model.

use swellmind_core::{
    ForecastObservation, LEARNED_PHASE_SESSIONS, ModelType, Scorer, ScoringResult, UserModel,
    UserPreferences, WindOrientation, extract_features, round_score,
};

use crate::HeuristicScorer;

const MIN_PREDICTED_RATING: f64 = 1.0;
const MAX_PREDICTED_RATING: f64 = 10.0;
const RATING_TO_SCORE: f64 = 10.0;

const BLENDED_LEAD: &str = "Based on your style + general patterns";
const LEARNED_LEAD: &str = "Personalized to your preferences";

/// How heuristic and learned scores are combined while a user's history is
/// still short.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendPolicy {
    /// Fraction of the blended score taken from the heuristic scorer; the
    /// rest comes from the model.
    pub heuristic_share: f64,
    /// Session count from which the learned score is used on its own.
    pub learned_after: usize,
}

impl BlendPolicy {
    /// Even split until [`LEARNED_PHASE_SESSIONS`] sessions.
    pub const STANDARD: Self = Self {
        heuristic_share: 0.5,
        learned_after: LEARNED_PHASE_SESSIONS,
    };

    /// Report whether `session_count` has reached the learned-only phase.
    #[must_use]
    pub const fn is_learned(&self, session_count: usize) -> bool {
        session_count >= self.learned_after
    }

    /// Combine a heuristic and a learned score.
    ///
    /// # Examples
    /// ```
    /// use swellmind_scorer::BlendPolicy;
    ///
    /// assert_eq!(BlendPolicy::STANDARD.blend(99, 50), 75);
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "weighted average of two scores")]
    pub fn blend(&self, heuristic: u8, learned: u8) -> u8 {
        let share = self.heuristic_share.clamp(0.0, 1.0);
        round_score(f64::from(heuristic) * share + f64::from(learned) * (1.0 - share))
    }
}

impl Default for BlendPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Convert a model prediction for `forecast` into a 10–100 score.
///
/// The predicted rating is clamped to 1–10 before scaling; a non-finite
/// prediction counts as the lowest rating.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use swellmind_core::{ForecastObservation, UserModel};
/// use swellmind_scorer::learned_score;
///
/// let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
/// let model = UserModel::new([0.0; 5], 7.26);
/// assert_eq!(learned_score(&model, &ForecastObservation::at(at)), 73);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "rating to score scaling")]
pub fn learned_score(model: &UserModel, forecast: &ForecastObservation) -> u8 {
    let prediction = model.predict(&extract_features(forecast));
    let rating = if prediction.is_finite() {
        prediction.clamp(MIN_PREDICTED_RATING, MAX_PREDICTED_RATING)
    } else {
        MIN_PREDICTED_RATING
    };
    round_score(rating * RATING_TO_SCORE)
}

/// Scores windows with a trained model, blending in the heuristic score
/// until the user reaches the learned phase.
#[derive(Debug, Clone, Copy)]
pub struct LearnedScorer<'a> {
    model: &'a UserModel,
    session_count: usize,
    policy: BlendPolicy,
    heuristic: HeuristicScorer,
}

impl<'a> LearnedScorer<'a> {
    /// Score with `model`, trained on `session_count` linked sessions.
    #[must_use]
    pub const fn new(model: &'a UserModel, session_count: usize) -> Self {
        Self {
            model,
            session_count,
            policy: BlendPolicy::STANDARD,
            heuristic: HeuristicScorer::new(),
        }
    }

    /// Replace the blend policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: BlendPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the heuristic scorer used for blending.
    #[must_use]
    pub const fn with_heuristic(mut self, heuristic: HeuristicScorer) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Phase this scorer operates in.
    #[must_use]
    pub const fn phase(&self) -> ModelType {
        if self.policy.is_learned(self.session_count) {
            ModelType::Learned
        } else {
            ModelType::Blended
        }
    }
}

impl Scorer for LearnedScorer<'_> {
    fn score(
        &self,
        forecast: &ForecastObservation,
        preferences: &UserPreferences,
    ) -> ScoringResult {
        let learned = learned_score(self.model, forecast);
        let (score, lead) = match self.phase() {
            ModelType::Learned => (learned, LEARNED_LEAD),
            ModelType::Generic | ModelType::Blended => {
                let heuristic = self.heuristic.score(forecast, preferences).score();
                (self.policy.blend(heuristic, learned), BLENDED_LEAD)
            }
        };
        ScoringResult::new(score, explain(lead, score, forecast, preferences))
    }
}

fn explain(
    lead: &str,
    score: u8,
    forecast: &ForecastObservation,
    preferences: &UserPreferences,
) -> String {
    let tier = match score {
        80.. => "Similar to your highest-rated sessions",
        60..=79 => "Conditions you tend to enjoy",
        _ => "May not match your typical preferences",
    };
    let mut notes = vec![tier];
    if forecast.wind_orientation == Some(WindOrientation::Offshore) {
        notes.push("clean offshore winds");
    }
    let ideal_size = forecast
        .measured_wave_height()
        .is_some_and(|metres| metres > 0.0 && preferences.wave_height_is_ideal(metres));
    if ideal_size {
        notes.push("ideal wave size");
    }
    format!("{lead}. {}.", notes.join(", "))
}

#[cfg(test)]
mod tests {
    //! Unit tests for learned and blended scoring.
    #![expect(clippy::expect_used, reason = "tests should fail fast")]

    use super::*;
    use rstest::{fixture, rstest};
    use swellmind_core::TimeOfDay;
    use swellmind_core::test_support::july;

    #[fixture]
    fn prefs() -> UserPreferences {
        UserPreferences::new(1.0, 2.0, 5, [TimeOfDay::Morning]).expect("valid preferences")
    }

    fn flat_model(intercept: f64) -> UserModel {
        UserModel::new([0.0; 5], intercept)
    }

    #[rstest]
    #[case(-4.0, 10)]
    #[case(0.5, 10)]
    #[case(5.56, 56)]
    #[case(10.0, 100)]
    #[case(42.0, 100)]
    #[case(f64::NAN, 10)]
    fn predictions_are_clamped_then_scaled(#[case] intercept: f64, #[case] expected: u8) {
        let forecast = ForecastObservation::at(july(2, 9));
        assert_eq!(learned_score(&flat_model(intercept), &forecast), expected);
    }

    #[rstest]
    #[case(3, ModelType::Blended)]
    #[case(9, ModelType::Blended)]
    #[case(10, ModelType::Learned)]
    fn phase_follows_policy(#[case] count: usize, #[case] expected: ModelType) {
        let model = flat_model(5.0);
        assert_eq!(LearnedScorer::new(&model, count).phase(), expected);
    }

    #[rstest]
    fn blended_phase_averages_both_scores(prefs: UserPreferences) {
        let forecast = ForecastObservation::at(july(2, 7))
            .with_wave_height(1.5)
            .with_wind_speed(2.0)
            .with_wind_orientation(WindOrientation::Offshore);
        let model = flat_model(5.0);
        let result = LearnedScorer::new(&model, 5).score(&forecast, &prefs);
        // Heuristic 99, learned 50.
        assert_eq!(result.score(), 75);
        assert!(result.is_recommended());
        assert_eq!(
            result.explanation(),
            "Based on your style + general patterns. Conditions you tend to enjoy, \
             clean offshore winds, ideal wave size."
        );
    }

    #[rstest]
    fn learned_phase_ignores_heuristic(prefs: UserPreferences) {
        let forecast = ForecastObservation::at(july(2, 20)).with_wave_height(0.2);
        let model = flat_model(9.0);
        let result = LearnedScorer::new(&model, 12).score(&forecast, &prefs);
        assert_eq!(result.score(), 90);
        assert_eq!(
            result.explanation(),
            "Personalized to your preferences. Similar to your highest-rated sessions."
        );
    }

    #[rstest]
    fn low_prediction_is_flagged(prefs: UserPreferences) {
        let forecast = ForecastObservation::at(july(2, 20));
        let model = flat_model(2.0);
        let result = LearnedScorer::new(&model, 10).score(&forecast, &prefs);
        assert_eq!(result.score(), 20);
        assert!(result.explanation().ends_with("May not match your typical preferences."));
    }

    #[rstest]
    fn custom_policy_shifts_the_blend(prefs: UserPreferences) {
        let forecast = ForecastObservation::at(july(2, 20));
        let model = flat_model(10.0);
        let policy = BlendPolicy {
            heuristic_share: 0.0,
            learned_after: 50,
        };
        let result = LearnedScorer::new(&model, 20)
            .with_policy(policy)
            .score(&forecast, &prefs);
        assert_eq!(result.score(), 100);
        assert!(result.explanation().starts_with(BLENDED_LEAD));
    }
}
