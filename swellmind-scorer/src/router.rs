//! Phase selection between heuristic and learned scoring.

use swellmind_core::{
    ForecastObservation, MIN_TRAINING_SESSIONS, ModelType, Scorer, ScoringResult, UserModel,
    UserPreferences,
};

use crate::{HeuristicScorer, LearnedScorer};

/// The scorer appropriate for a user's current phase.
#[derive(Debug, Clone, Copy)]
pub enum WindowScorer<'a> {
    /// Rules only; used before a model exists.
    Heuristic(HeuristicScorer),
    /// Model-based, blended or learned-only.
    Learned(LearnedScorer<'a>),
}

impl<'a> WindowScorer<'a> {
    /// Choose a scorer for a user with `session_count` linked sessions.
    ///
    /// The heuristic scorer is used below [`MIN_TRAINING_SESSIONS`] sessions
    /// or when no model has been trained yet.
    #[must_use]
    pub fn select(model: Option<&'a UserModel>, session_count: usize) -> Self {
        match model {
            Some(trained) if session_count >= MIN_TRAINING_SESSIONS => {
                Self::Learned(LearnedScorer::new(trained, session_count))
            }
            None if session_count >= MIN_TRAINING_SESSIONS => {
                log::debug!(
                    "no trained model for {session_count} sessions; using heuristic scoring"
                );
                Self::Heuristic(HeuristicScorer::new())
            }
            _ => Self::Heuristic(HeuristicScorer::new()),
        }
    }

    /// Phase the selected scorer operates in.
    #[must_use]
    pub const fn phase(&self) -> ModelType {
        match self {
            Self::Heuristic(_) => ModelType::Generic,
            Self::Learned(scorer) => scorer.phase(),
        }
    }
}

impl Scorer for WindowScorer<'_> {
    fn score(
        &self,
        forecast: &ForecastObservation,
        preferences: &UserPreferences,
    ) -> ScoringResult {
        match self {
            Self::Heuristic(scorer) => scorer.score(forecast, preferences),
            Self::Learned(scorer) => scorer.score(forecast, preferences),
        }
    }
}

/// Score one forecast window for a user.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use swellmind_core::{ForecastObservation, UserModel, UserPreferences};
/// use swellmind_scorer::score_window;
///
/// let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
/// let forecast = ForecastObservation::at(at);
/// let model = UserModel::new([0.0; 5], 8.0);
///
/// let result = score_window(&forecast, &UserPreferences::default(), Some(&model), 12);
/// assert_eq!(result.score(), 80);
/// ```
#[must_use]
pub fn score_window(
    forecast: &ForecastObservation,
    preferences: &UserPreferences,
    model: Option<&UserModel>,
    session_count: usize,
) -> ScoringResult {
    WindowScorer::select(model, session_count).score(forecast, preferences)
}
