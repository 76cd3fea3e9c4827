//! Fitting user models from linked sessions.

use chrono::{DateTime, Utc};
use swellmind_core::{
    FeatureVector, FixedApproximation, MIN_TRAINING_SESSIONS, ModelType, Regressor, SessionRecord,
    TrainingSample, UserModel, UserModelStats, extract_features,
};

/// Regressor used when callers do not choose one.
#[cfg(feature = "regressor-ols")]
pub type DefaultRegressor = swellmind_regressor_ols::FullOls;

/// Regressor used when callers do not choose one.
#[cfg(not(feature = "regressor-ols"))]
pub type DefaultRegressor = FixedApproximation;

/// The regressor selected by the `regressor-ols` feature.
#[must_use]
pub fn default_regressor() -> DefaultRegressor {
    DefaultRegressor::default()
}

/// Build a trainer backed by [`DefaultRegressor`].
///
/// # Examples
/// ```
/// use swellmind_core::test_support::{july, varied_sessions};
/// use swellmind_trainer::default_trainer;
///
/// assert!(default_trainer().train(&[]).is_none());
/// let stats = default_trainer().retrain(&varied_sessions(), july(30, 0));
/// assert!(stats.model.is_some());
/// ```
#[must_use]
pub fn default_trainer() -> ModelTrainer<DefaultRegressor> {
    ModelTrainer::new(default_regressor())
}

/// Trains per-user linear models with a pluggable regressor.
///
/// # Examples
/// ```
/// use swellmind_core::FixedApproximation;
/// use swellmind_core::test_support::alternating_samples;
/// use swellmind_trainer::ModelTrainer;
///
/// let trainer = ModelTrainer::new(FixedApproximation);
/// assert!(trainer.train(&alternating_samples(2)).is_none());
/// assert!(trainer.train(&alternating_samples(3)).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelTrainer<R> {
    regressor: R,
}

impl<R: Regressor> ModelTrainer<R> {
    /// Create a trainer that fits with `regressor`.
    #[must_use]
    pub const fn new(regressor: R) -> Self {
        Self { regressor }
    }

    /// Borrow the configured regressor.
    #[must_use]
    pub const fn regressor(&self) -> &R {
        &self.regressor
    }

    /// Fit a model to `samples`.
    ///
    /// Returns `None` with fewer than [`MIN_TRAINING_SESSIONS`] samples.
    /// When the regressor fails or yields non-finite parameters the fixed
    /// approximation is used instead, so enough samples always produce a
    /// model.
    #[must_use]
    pub fn train(&self, samples: &[TrainingSample]) -> Option<UserModel> {
        if samples.len() < MIN_TRAINING_SESSIONS {
            return None;
        }
        let features: Vec<FeatureVector> = samples
            .iter()
            .map(|sample| extract_features(&sample.forecast))
            .collect();
        let targets: Vec<f64> = samples.iter().map(|sample| sample.rating.as_f64()).collect();

        match self.regressor.fit(&features, &targets) {
            Ok(model) if model.is_finite() => Some(model),
            Ok(_) => {
                log::warn!("regressor returned non-finite parameters; using fixed approximation");
                FixedApproximation.fit(&features, &targets).ok()
            }
            Err(err) => {
                log::warn!("regression failed ({err}); using fixed approximation");
                FixedApproximation.fit(&features, &targets).ok()
            }
        }
    }

    /// Retrain from a user's full session history.
    ///
    /// Only sessions with a linked forecast count towards the model and the
    /// reported session total. The phase is derived from that total alone,
    /// whichever fitting path produced the model.
    #[must_use]
    pub fn retrain(&self, sessions: &[SessionRecord], now: DateTime<Utc>) -> UserModelStats {
        let samples = TrainingSample::from_sessions(sessions);
        let model = self.train(&samples);
        UserModelStats {
            num_sessions: samples.len(),
            model_type: ModelType::for_session_count(samples.len()),
            last_trained_at: model.as_ref().map(|_| now),
            model,
        }
    }
}
