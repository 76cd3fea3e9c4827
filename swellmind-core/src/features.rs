//! Numeric encoding of forecast observations.
//!
//! Training and prediction share [`extract_features`], so a model's
//! coefficients always line up positionally with the vector produced here:
//!
//! | index | feature | fallback |
//! |-------|---------|----------|
//! | 0 | wave height (m) | 1.0 |
//! | 1 | wave period (s) | 10.0 |
//! | 2 | wind speed (m/s) / 10 | 0.5 |
//! | 3 | wind orientation, offshore = 1.0 .. onshore = 0.0 | 0.5 |
//! | 4 | time of day, morning = 1.0 .. evening = 0.4 | n/a |

use crate::{ForecastObservation, TimeOfDay, WindOrientation};

/// Number of features in a [`FeatureVector`].
pub const FEATURE_COUNT: usize = 5;

/// Fixed-length feature encoding of one forecast.
pub type FeatureVector = [f64; FEATURE_COUNT];

const FALLBACK_WAVE_HEIGHT: f64 = 1.0;
const FALLBACK_WAVE_PERIOD: f64 = 10.0;
const FALLBACK_WIND_SPEED: f64 = 5.0;
const WIND_SPEED_SCALE: f64 = 10.0;
const FALLBACK_ORIENTATION: f64 = 0.5;

/// Encode a wind orientation on a continuous offshore-to-onshore scale.
#[must_use]
pub const fn encode_wind_orientation(orientation: Option<WindOrientation>) -> f64 {
    match orientation {
        Some(WindOrientation::Offshore) => 1.0,
        Some(WindOrientation::CrossOffshore) => 0.75,
        Some(WindOrientation::Cross) => 0.5,
        Some(WindOrientation::CrossOnshore) => 0.25,
        Some(WindOrientation::Onshore) => 0.0,
        None => FALLBACK_ORIENTATION,
    }
}

/// Encode a time-of-day bucket on a continuous scale.
#[must_use]
pub const fn encode_time_of_day(bucket: TimeOfDay) -> f64 {
    match bucket {
        TimeOfDay::Dawn => 0.9,
        TimeOfDay::Morning => 1.0,
        TimeOfDay::Midday => 0.6,
        TimeOfDay::Afternoon => 0.5,
        TimeOfDay::Evening => 0.4,
    }
}

/// Convert a forecast into its feature vector.
///
/// Missing (or non-finite) measurements are replaced with neutral fallbacks,
/// so the function never fails.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use swellmind_core::{ForecastObservation, extract_features};
///
/// let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
/// let features = extract_features(&ForecastObservation::at(at));
/// assert_eq!(features, [1.0, 10.0, 0.5, 0.5, 1.0]);
/// ```
#[must_use]
pub fn extract_features(forecast: &ForecastObservation) -> FeatureVector {
    let wind_speed = forecast
        .measured_wind_speed()
        .unwrap_or(FALLBACK_WIND_SPEED);
    [
        forecast
            .measured_wave_height()
            .unwrap_or(FALLBACK_WAVE_HEIGHT),
        forecast
            .measured_wave_period()
            .unwrap_or(FALLBACK_WAVE_PERIOD),
        wind_speed / WIND_SPEED_SCALE,
        encode_wind_orientation(forecast.wind_orientation),
        encode_time_of_day(forecast.time_of_day()),
    ]
}
