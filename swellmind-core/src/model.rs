//! Per-user linear models and the phase they are used in.

use chrono::{DateTime, Utc};

use crate::{FEATURE_COUNT, FeatureVector};

/// Sessions needed before a model is trained at all.
pub const MIN_TRAINING_SESSIONS: usize = 3;

/// Sessions needed before scoring relies on the model alone.
pub const LEARNED_PHASE_SESSIONS: usize = 10;

/// Linear model mapping a feature vector to a predicted 1–10 rating.
///
/// # Examples
/// ```
/// use swellmind_core::UserModel;
///
/// let model = UserModel::new([1.0, 0.0, 0.0, 2.0, 0.0], 3.0);
/// assert_eq!(model.predict(&[1.5, 10.0, 0.5, 1.0, 0.9]), 6.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserModel {
    /// Weights aligned positionally with [`crate::extract_features`].
    pub coefficients: [f64; FEATURE_COUNT],
    /// Constant term.
    pub intercept: f64,
}

impl UserModel {
    /// Construct a model from coefficients and an intercept.
    #[must_use]
    pub const fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Predict a raw (unclamped) rating for a feature vector.
    #[must_use]
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (weight, value)| acc + weight * value)
    }

    /// Report whether every parameter is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.coefficients.iter().all(|value| value.is_finite())
    }
}

/// Scoring regime selected by how many sessions a user has logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ModelType {
    /// Fewer than [`MIN_TRAINING_SESSIONS`]; heuristic scoring only.
    Generic,
    /// Heuristic and learned scores are averaged.
    Blended,
    /// At least [`LEARNED_PHASE_SESSIONS`]; the learned score stands alone.
    Learned,
}

impl ModelType {
    /// Classify a session count.
    ///
    /// # Examples
    /// ```
    /// use swellmind_core::ModelType;
    ///
    /// assert_eq!(ModelType::for_session_count(2), ModelType::Generic);
    /// assert_eq!(ModelType::for_session_count(3), ModelType::Blended);
    /// assert_eq!(ModelType::for_session_count(10), ModelType::Learned);
    /// ```
    #[must_use]
    pub const fn for_session_count(count: usize) -> Self {
        if count < MIN_TRAINING_SESSIONS {
            Self::Generic
        } else if count < LEARNED_PHASE_SESSIONS {
            Self::Blended
        } else {
            Self::Learned
        }
    }

    /// Return the phase as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Blended => "blended",
            Self::Learned => "learned",
        }
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the trainer hands to the model store after every retrain.
///
/// The previous record for the user is replaced wholesale.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserModelStats {
    /// Sessions with a linked forecast at training time.
    pub num_sessions: usize,
    /// Phase implied by `num_sessions`.
    pub model_type: ModelType,
    /// Fitted parameters, absent below [`MIN_TRAINING_SESSIONS`].
    #[cfg_attr(feature = "serde", serde(alias = "model_params", default))]
    pub model: Option<UserModel>,
    /// When the model was last fitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_trained_at: Option<DateTime<Utc>>,
}

impl UserModelStats {
    /// Stats for a user who cannot be modelled yet.
    #[must_use]
    pub const fn untrained(num_sessions: usize) -> Self {
        Self {
            num_sessions,
            model_type: ModelType::for_session_count(num_sessions),
            model: None,
            last_trained_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, ModelType::Generic)]
    #[case(2, ModelType::Generic)]
    #[case(3, ModelType::Blended)]
    #[case(9, ModelType::Blended)]
    #[case(10, ModelType::Learned)]
    #[case(250, ModelType::Learned)]
    fn phase_thresholds(#[case] count: usize, #[case] expected: ModelType) {
        assert_eq!(ModelType::for_session_count(count), expected);
    }

    #[rstest]
    fn prediction_adds_intercept_to_weighted_features() {
        let model = UserModel::new([0.5, 0.1, -0.3, 2.0, 0.5], 6.0);
        let prediction = model.predict(&[1.0, 10.0, 0.5, 1.0, 1.0]);
        assert!((prediction - 9.85).abs() < 1e-9);
    }

    #[rstest]
    fn non_finite_parameters_are_detected() {
        let model = UserModel::new([0.0, f64::NAN, 0.0, 0.0, 0.0], 1.0);
        assert!(!model.is_finite());
    }
}
