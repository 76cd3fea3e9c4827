//! Ordinary least-squares regressor for SwellMind user models.
//!
//! [`FullOls`] fits `rating ≈ intercept + Σ wᵢ·featureᵢ` by forming the
//! normal equations `XᵀX·β = Xᵀy` over an `ndarray` design matrix and
//! solving them through an LU factorisation with partial pivoting from
//! `ndarray-linalg`.
//!
//! Systems without a unique solution (constant or collinear features, fewer
//! distinct rows than parameters) are reported as
//! [`RegressionError::Singular`] so the trainer can fall back.

#![forbid(unsafe_code)]

use ndarray::{Array1, Array2};
use ndarray_linalg::error::LinalgError;
use ndarray_linalg::{FactorizeInto, ReciprocalConditionNum, Solve};
use swellmind_core::{FEATURE_COUNT, FeatureVector, RegressionError, Regressor, UserModel};

/// Parameters solved for: one weight per feature plus the intercept.
const PARAMETER_COUNT: usize = FEATURE_COUNT + 1;

/// Gram matrices with a reciprocal condition number below this are singular.
const MIN_RECIPROCAL_CONDITION: f64 = 1e-12;

/// Least-squares regressor with an intercept term.
///
/// # Examples
/// ```
/// use swellmind_core::{RegressionError, Regressor};
/// use swellmind_regressor_ols::FullOls;
///
/// let features = [[1.0, 10.0, 0.5, 0.5, 1.0]; 3];
/// assert_eq!(
///     FullOls::new().fit(&features, &[6.0, 7.0, 8.0]),
///     Err(RegressionError::Singular)
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullOls;

impl FullOls {
    /// Create the regressor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Regressor for FullOls {
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
        let all_finite = targets.iter().all(|value| value.is_finite())
            && features.iter().flatten().all(|value| value.is_finite());
        if !all_finite {
            return Err(RegressionError::NonFiniteInput);
        }

        let design = design_matrix(features);
        let solution = solve_normal_equations(&design, &Array1::from(targets.to_vec()))?;
        let model = into_model(&solution);
        if model.is_finite() {
            Ok(model)
        } else {
            Err(RegressionError::NonFiniteSolution)
        }
    }
}

/// Stack feature rows into an `n × 6` matrix whose last column is all ones.
fn design_matrix(features: &[FeatureVector]) -> Array2<f64> {
    Array2::from_shape_fn((features.len(), PARAMETER_COUNT), |(row, column)| {
        features
            .get(row)
            .and_then(|values| values.get(column))
            .copied()
            // Only the intercept column falls outside the feature vector.
            .unwrap_or(1.0)
    })
}

/// Solve `XᵀX·β = Xᵀy`.
fn solve_normal_equations(
    design: &Array2<f64>,
    targets: &Array1<f64>,
) -> Result<Array1<f64>, RegressionError> {
    let gram = design.t().dot(design);
    let moments = design.t().dot(targets);

    // An exactly zero pivot makes the factorisation itself fail.
    let factors = gram.factorize_into().map_err(|err| {
        log::debug!("normal equations could not be factorised: {err}");
        RegressionError::Singular
    })?;
    let condition = factors.rcond().map_err(|err| solver_error(&err))?;
    if condition.is_nan() || condition < MIN_RECIPROCAL_CONDITION {
        log::debug!("normal equations are ill-conditioned (rcond {condition:e})");
        return Err(RegressionError::Singular);
    }
    factors.solve_into(moments).map_err(|err| solver_error(&err))
}

fn solver_error(err: &LinalgError) -> RegressionError {
    RegressionError::Solver {
        message: err.to_string(),
    }
}

fn into_model(solution: &Array1<f64>) -> UserModel {
    let mut coefficients = [0.0; FEATURE_COUNT];
    for (slot, value) in coefficients.iter_mut().zip(solution.iter()) {
        *slot = *value;
    }
    let intercept = solution.get(FEATURE_COUNT).copied().unwrap_or_default();
    UserModel::new(coefficients, intercept)
}
