//! Core domain types for the SwellMind engine.
//!
//! The crate defines the shared vocabulary used by every other workspace
//! member: forecast observations, user preferences, logged sessions, the
//! per-user linear model and the result of scoring a forecast window. It also
//! owns the two pieces of logic that must behave identically everywhere:
//! time-of-day bucketing and feature extraction.
//!
//! Nothing in this crate performs I/O. Missing measurements are absorbed by
//! documented fallbacks rather than rejected.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod features;
pub mod forecast;
pub mod model;
pub mod preferences;
pub mod regressor;
pub mod scoring;
pub mod session;
pub mod time_of_day;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use features::{FEATURE_COUNT, FeatureVector, extract_features};
pub use forecast::{ForecastObservation, WindOrientation, is_three_hour_window};
pub use model::{
    LEARNED_PHASE_SESSIONS, MIN_TRAINING_SESSIONS, ModelType, UserModel, UserModelStats,
};
pub use preferences::{PreferencesError, UserPreferences};
pub use regressor::{FALLBACK_COEFFICIENTS, FixedApproximation, RegressionError, Regressor};
pub use scoring::{RECOMMENDATION_THRESHOLD, Scorer, ScoringResult, round_score};
pub use session::{
    FORECAST_LINK_TOLERANCE, Rating, RatingError, SessionRecord, TrainingSample, UserId,
    link_nearest_forecast,
};
pub use time_of_day::TimeOfDay;
