//! Facade crate for the Swellmind surf forecast engine.
//!
//! This crate re-exports the core domain types, the scorers, the trainer and
//! the insights aggregator. The `regressor-ols` feature switches
//! [`DefaultRegressor`] to full least squares.
//!
//! # Examples
//! ```
//! use swellmind_core::test_support::{clean_forecast, july, messy_forecast, varied_sessions};
//! use swellmind_engine::{
//!     InsightsReport, ModelType, UserPreferences, default_trainer, rank_windows,
//! };
//!
//! let sessions = varied_sessions();
//! let stats = default_trainer().retrain(&sessions, july(28, 0));
//! assert_eq!(stats.model_type, ModelType::Learned);
//!
//! let windows = [messy_forecast(july(29, 6)), clean_forecast(july(29, 9))];
//! let ranked = rank_windows(
//!     &windows,
//!     &UserPreferences::default(),
//!     stats.model.as_ref(),
//!     stats.num_sessions,
//!     july(28, 0),
//!     10,
//! );
//! assert_eq!(ranked.first().map(|window| &window.forecast), windows.get(1));
//!
//! let report = InsightsReport::build(&sessions, july(28, 0));
//! assert!(report.insights.is_some());
//! assert!(report.message.is_none());
//! ```

#![forbid(unsafe_code)]

pub use swellmind_core::{
    FixedApproximation, ForecastObservation, ModelType, Rating, RegressionError, Regressor,
    Scorer, ScoringResult, SessionRecord, TimeOfDay, TrainingSample, UserId, UserModel,
    UserModelStats, UserPreferences, WindOrientation,
};
pub use swellmind_insights::{
    InsightsAvailability, InsightsReport, SessionStatistics, UserInsights, calculate_insights,
    recommendations,
};
pub use swellmind_scorer::{
    HeuristicScorer, LearnedScorer, ScoredWindow, WindowScorer, rank_windows, score_window,
};
pub use swellmind_trainer::{
    DefaultRegressor, ModelSink, ModelTrainer, RetrainHandle, RetrainWorker, SessionSetChanged,
    SessionSource, default_regressor, default_trainer,
};

#[cfg(feature = "regressor-ols")]
pub use swellmind_regressor_ols::FullOls;
