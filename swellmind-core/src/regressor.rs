//! Regression capability used by the model trainer.
//!
//! The trainer only depends on the [`Regressor`] trait. This crate ships the
//! [`FixedApproximation`] variant, which needs no linear algebra and is
//! always available; a full least-squares implementation lives in the
//! `swellmind-regressor-ols` crate and is selected at build time.

use thiserror::Error;

use crate::{FEATURE_COUNT, FeatureVector, UserModel};

/// Coefficients used when no regression solver is available or it fails.
pub const FALLBACK_COEFFICIENTS: [f64; FEATURE_COUNT] = [0.5, 0.1, -0.3, 2.0, 0.5];

/// Errors raised while fitting a model.
#[derive(Debug, Error, PartialEq)]
pub enum RegressionError {
    /// No samples were supplied.
    #[error("cannot fit a model without samples")]
    Empty,
    /// Feature rows and targets had different lengths.
    #[error("{rows} feature rows do not match {targets} targets")]
    LengthMismatch {
        /// Number of feature rows.
        rows: usize,
        /// Number of targets.
        targets: usize,
    },
    /// An input value was NaN or infinite.
    #[error("training data contains non-finite values")]
    NonFiniteInput,
    /// The normal equations have no unique solution, for example when two
    /// features move together or there are fewer distinct rows than
    /// parameters.
    #[error("normal equations are singular")]
    Singular,
    /// The linear algebra backend failed.
    #[error("linear solver failed: {message}")]
    Solver {
        /// Backend error description.
        message: String,
    },
    /// The solver produced unusable parameters.
    #[error("regression produced non-finite parameters")]
    NonFiniteSolution,
}

/// Fit a linear model from feature rows to ratings.
///
/// Implementations must be `Send + Sync` so a trainer can be shared by a
/// background worker.
///
/// # Examples
/// ```
/// use swellmind_core::{FixedApproximation, Regressor};
///
/// let model = FixedApproximation
///     .fit(&[[1.0, 10.0, 0.5, 1.0, 1.0]; 3], &[6.0, 8.0, 7.0])
///     .expect("fixed approximation fits any non-empty data");
/// assert_eq!(model.intercept, 7.0);
/// ```
pub trait Regressor: Send + Sync {
    /// Fit a model mapping `features[i]` to `targets[i]`.
    ///
    /// # Errors
    /// Returns [`RegressionError`] when the inputs are unusable or the
    /// solver cannot produce finite parameters.
    fn fit(
        &self,
        features: &[FeatureVector],
        targets: &[f64],
    ) -> Result<UserModel, RegressionError>;
}

/// Fixed coefficient vector with the mean rating as intercept.
///
/// This is the degraded model used when a full solver is unavailable; it
/// only fails when there is nothing to average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedApproximation;

impl Regressor for FixedApproximation {
    fn fit(
        &self,
        features: &[FeatureVector],
        targets: &[f64],
    ) -> Result<UserModel, RegressionError> {
        if targets.is_empty() {
            return Err(RegressionError::Empty);
        }
        if features.len() != targets.len() {
            return Err(RegressionError::LengthMismatch {
                rows: features.len(),
                targets: targets.len(),
            });
        }
        let intercept = mean(targets).ok_or(RegressionError::NonFiniteInput)?;
        Ok(UserModel::new(FALLBACK_COEFFICIENTS, intercept))
    }
}

/// Arithmetic mean, `None` for empty or non-finite input.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: f64 = values.iter().sum();
    let average = total / values.len() as f64;
    average.is_finite().then_some(average)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fixed_approximation_uses_mean_rating() {
        let features = [[1.0, 10.0, 0.5, 0.5, 1.0]; 4];
        let model = FixedApproximation
            .fit(&features, &[4.0, 6.0, 8.0, 10.0])
            .expect("fit succeeds");
        assert_eq!(model.coefficients, FALLBACK_COEFFICIENTS);
        assert!((model.intercept - 7.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn fixed_approximation_rejects_empty_input() {
        assert_eq!(FixedApproximation.fit(&[], &[]), Err(RegressionError::Empty));
    }

    #[rstest]
    fn fixed_approximation_rejects_mismatched_lengths() {
        let err = FixedApproximation
            .fit(&[[0.0; FEATURE_COUNT]], &[5.0, 6.0])
            .expect_err("mismatch");
        assert_eq!(err, RegressionError::LengthMismatch { rows: 1, targets: 2 });
    }
}
