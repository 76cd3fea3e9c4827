//! Stated surf preferences owned by the user profile.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::TimeOfDay;

const DEFAULT_WAVE_SIZE_MIN: f64 = 0.5;
const DEFAULT_WAVE_SIZE_MAX: f64 = 2.0;
const DEFAULT_CROWD_TOLERANCE: u8 = 5;

/// Preferences a user declares before the engine has learnt anything.
///
/// # Examples
/// ```
/// use swellmind_core::{TimeOfDay, UserPreferences};
///
/// # fn main() -> Result<(), swellmind_core::PreferencesError> {
/// let prefs = UserPreferences::new(1.0, 2.0, 4, [TimeOfDay::Morning])?;
/// assert!(prefs.prefers(TimeOfDay::Morning));
/// assert!(!prefs.prefers(TimeOfDay::Evening));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct UserPreferences {
    /// Smallest wave height, in metres, the user considers ideal.
    pub ideal_wave_size_min: f64,
    /// Largest wave height, in metres, the user considers ideal.
    pub ideal_wave_size_max: f64,
    /// Tolerance for crowded line-ups on a 1–10 scale.
    pub crowd_tolerance: u8,
    /// Time-of-day buckets the user likes to surf in.
    pub preferred_times_of_day: BTreeSet<TimeOfDay>,
}

/// Errors returned by [`UserPreferences::new`] and
/// [`UserPreferences::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum PreferencesError {
    /// A wave size bound was NaN or infinite.
    #[error("ideal wave sizes must be finite")]
    NonFiniteWaveSize,
    /// The minimum ideal wave size exceeded the maximum.
    #[error("ideal wave size minimum {min} exceeds maximum {max}")]
    InvertedWaveRange {
        /// Requested minimum in metres.
        min: f64,
        /// Requested maximum in metres.
        max: f64,
    },
    /// Crowd tolerance fell outside `1..=10`.
    #[error("crowd tolerance {value} must be between 1 and 10")]
    CrowdToleranceOutOfRange {
        /// Rejected tolerance.
        value: u8,
    },
}

impl UserPreferences {
    /// Validate and construct a set of preferences.
    ///
    /// # Errors
    /// Returns [`PreferencesError`] when the wave range is inverted or not
    /// finite, or when the crowd tolerance is outside `1..=10`.
    pub fn new(
        ideal_wave_size_min: f64,
        ideal_wave_size_max: f64,
        crowd_tolerance: u8,
        preferred_times_of_day: impl IntoIterator<Item = TimeOfDay>,
    ) -> Result<Self, PreferencesError> {
        let prefs = Self {
            ideal_wave_size_min,
            ideal_wave_size_max,
            crowd_tolerance,
            preferred_times_of_day: preferred_times_of_day.into_iter().collect(),
        };
        prefs.validate()?;
        Ok(prefs)
    }

    /// Check the invariants of an already constructed value, e.g. one read
    /// from JSON.
    ///
    /// # Errors
    /// See [`UserPreferences::new`].
    pub fn validate(&self) -> Result<(), PreferencesError> {
        let (min, max) = (self.ideal_wave_size_min, self.ideal_wave_size_max);
        if !min.is_finite() || !max.is_finite() {
            return Err(PreferencesError::NonFiniteWaveSize);
        }
        if min > max {
            return Err(PreferencesError::InvertedWaveRange { min, max });
        }
        if !(1..=10).contains(&self.crowd_tolerance) {
            return Err(PreferencesError::CrowdToleranceOutOfRange {
                value: self.crowd_tolerance,
            });
        }
        Ok(())
    }

    /// Report whether a wave height sits inside the ideal range, bounds
    /// included.
    #[must_use]
    pub fn wave_height_is_ideal(&self, height: f64) -> bool {
        (self.ideal_wave_size_min..=self.ideal_wave_size_max).contains(&height)
    }

    /// Report whether the user prefers surfing in `bucket`.
    #[must_use]
    pub fn prefers(&self, bucket: TimeOfDay) -> bool {
        self.preferred_times_of_day.contains(&bucket)
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            ideal_wave_size_min: DEFAULT_WAVE_SIZE_MIN,
            ideal_wave_size_max: DEFAULT_WAVE_SIZE_MAX,
            crowd_tolerance: DEFAULT_CROWD_TOLERANCE,
            preferred_times_of_day: BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_preferences_are_valid() {
        assert!(UserPreferences::default().validate().is_ok());
    }

    #[rstest]
    fn equal_bounds_are_accepted() {
        assert!(UserPreferences::new(1.5, 1.5, 5, []).is_ok());
    }

    #[rstest]
    fn inverted_range_is_rejected() {
        let err = UserPreferences::new(2.0, 1.0, 5, []).expect_err("inverted range");
        assert_eq!(err, PreferencesError::InvertedWaveRange { min: 2.0, max: 1.0 });
    }

    #[rstest]
    #[case(0)]
    #[case(11)]
    fn crowd_tolerance_outside_range_is_rejected(#[case] value: u8) {
        let err = UserPreferences::new(1.0, 2.0, value, []).expect_err("bad tolerance");
        assert_eq!(err, PreferencesError::CrowdToleranceOutOfRange { value });
    }

    #[rstest]
    fn non_finite_bounds_are_rejected() {
        let err = UserPreferences::new(f64::NAN, 2.0, 5, []).expect_err("nan bound");
        assert_eq!(err, PreferencesError::NonFiniteWaveSize);
    }

    #[rstest]
    #[case(1.0, true)]
    #[case(2.0, true)]
    #[case(0.99, false)]
    #[case(2.01, false)]
    fn ideal_range_is_inclusive(#[case] height: f64, #[case] expected: bool) {
        let prefs = UserPreferences::new(1.0, 2.0, 5, []).expect("valid prefs");
        assert_eq!(prefs.wave_height_is_ideal(height), expected);
    }
}
