//! Forecast observations and the wind orientation derived from them.
//!
//! A [`ForecastObservation`] is a single three-hour window for one spot. Every
//! measurement is optional because upstream marine and weather feeds regularly
//! leave gaps; consumers apply their own neutral fallbacks.

use chrono::{DateTime, Timelike, Utc};

use crate::TimeOfDay;

/// Wind direction relative to the way a beach faces.
///
/// Offshore wind blows from land to sea and grooms the waves; onshore wind
/// blows from the sea and breaks them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum WindOrientation {
    /// Wind blowing straight out to sea.
    Offshore,
    /// Wind angled between cross-shore and offshore.
    CrossOffshore,
    /// Wind running parallel to the beach.
    Cross,
    /// Wind angled between cross-shore and onshore.
    CrossOnshore,
    /// Wind blowing straight onto the beach.
    Onshore,
}

impl WindOrientation {
    /// Every orientation, from cleanest to messiest.
    pub const ALL: [Self; 5] = [
        Self::Offshore,
        Self::CrossOffshore,
        Self::Cross,
        Self::CrossOnshore,
        Self::Onshore,
    ];

    /// Classify a wind direction against the direction a beach faces.
    ///
    /// Both angles are compass degrees; the wind direction is where the wind
    /// comes *from*. A relative angle of 180° is dead offshore and 0° is dead
    /// onshore. Returns `None` when either input is not finite.
    ///
    /// # Examples
    /// ```
    /// use swellmind_core::WindOrientation;
    ///
    /// // A west-facing beach with an easterly wind.
    /// assert_eq!(
    ///     WindOrientation::from_directions(90.0, 270.0),
    ///     Some(WindOrientation::Offshore)
    /// );
    /// ```
    #[must_use]
    pub fn from_directions(wind_direction: f64, beach_orientation: f64) -> Option<Self> {
        if !wind_direction.is_finite() || !beach_orientation.is_finite() {
            return None;
        }
        let relative = (wind_direction - beach_orientation).rem_euclid(360.0);
        let orientation = if (150.0..=210.0).contains(&relative) {
            Self::Offshore
        } else if (120.0..150.0).contains(&relative) || (210.0..240.0).contains(&relative) {
            Self::CrossOffshore
        } else if (60.0..120.0).contains(&relative) || (240.0..300.0).contains(&relative) {
            Self::Cross
        } else if (30.0..60.0).contains(&relative) || (300.0..330.0).contains(&relative) {
            Self::CrossOnshore
        } else {
            Self::Onshore
        };
        Some(orientation)
    }

    /// Return the orientation as its kebab-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Offshore => "offshore",
            Self::CrossOffshore => "cross-offshore",
            Self::Cross => "cross",
            Self::CrossOnshore => "cross-onshore",
            Self::Onshore => "onshore",
        }
    }
}

impl std::fmt::Display for WindOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WindOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "offshore" => Ok(Self::Offshore),
            "cross-offshore" => Ok(Self::CrossOffshore),
            "cross" => Ok(Self::Cross),
            "cross-onshore" => Ok(Self::CrossOnshore),
            "onshore" => Ok(Self::Onshore),
            _ => Err(format!("unknown wind orientation '{s}'")),
        }
    }
}

/// Environmental snapshot for one spot and forecast window.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use swellmind_core::{ForecastObservation, TimeOfDay, WindOrientation};
///
/// let at = Utc.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap();
/// let forecast = ForecastObservation::at(at)
///     .with_wave_height(1.4)
///     .with_wind_orientation(WindOrientation::Offshore);
///
/// assert_eq!(forecast.time_of_day(), TimeOfDay::Dawn);
/// assert!(forecast.wave_period.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastObservation {
    /// Start of the forecast window.
    #[cfg_attr(feature = "serde", serde(alias = "timestamp_utc"))]
    pub timestamp: DateTime<Utc>,
    /// Significant wave height in metres.
    pub wave_height: Option<f64>,
    /// Dominant wave period in seconds.
    pub wave_period: Option<f64>,
    /// Direction the swell arrives from, in degrees.
    pub wave_direction: Option<f64>,
    /// Wind speed at 10 m in metres per second.
    pub wind_speed: Option<f64>,
    /// Direction the wind blows from, in degrees.
    pub wind_direction: Option<f64>,
    /// Wind direction relative to the spot.
    pub wind_orientation: Option<WindOrientation>,
}

impl ForecastObservation {
    /// Construct an observation with every measurement missing.
    #[must_use]
    pub const fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            wave_height: None,
            wave_period: None,
            wave_direction: None,
            wind_speed: None,
            wind_direction: None,
            wind_orientation: None,
        }
    }

    /// Set the wave height in metres.
    #[must_use]
    pub const fn with_wave_height(mut self, metres: f64) -> Self {
        self.wave_height = Some(metres);
        self
    }

    /// Set the wave period in seconds.
    #[must_use]
    pub const fn with_wave_period(mut self, seconds: f64) -> Self {
        self.wave_period = Some(seconds);
        self
    }

    /// Set the swell direction in degrees.
    #[must_use]
    pub const fn with_wave_direction(mut self, degrees: f64) -> Self {
        self.wave_direction = Some(degrees);
        self
    }

    /// Set the wind speed in metres per second.
    #[must_use]
    pub const fn with_wind_speed(mut self, metres_per_second: f64) -> Self {
        self.wind_speed = Some(metres_per_second);
        self
    }

    /// Set the wind direction in degrees.
    #[must_use]
    pub const fn with_wind_direction(mut self, degrees: f64) -> Self {
        self.wind_direction = Some(degrees);
        self
    }

    /// Set the wind orientation relative to the spot.
    #[must_use]
    pub const fn with_wind_orientation(mut self, orientation: WindOrientation) -> Self {
        self.wind_orientation = Some(orientation);
        self
    }

    /// Derive the wind orientation from the wind direction and the direction
    /// the beach faces. Leaves the observation untouched when no wind
    /// direction is known.
    #[must_use]
    pub fn oriented_to(mut self, beach_orientation: f64) -> Self {
        if let Some(orientation) = self
            .wind_direction
            .and_then(|wind| WindOrientation::from_directions(wind, beach_orientation))
        {
            self.wind_orientation = Some(orientation);
        }
        self
    }

    /// Bucket the observation's timestamp.
    #[must_use]
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::from_timestamp(self.timestamp)
    }

    /// Wave height, treating non-finite values as missing.
    #[must_use]
    pub fn measured_wave_height(&self) -> Option<f64> {
        self.wave_height.filter(|value| value.is_finite())
    }

    /// Wave period, treating non-finite values as missing.
    #[must_use]
    pub fn measured_wave_period(&self) -> Option<f64> {
        self.wave_period.filter(|value| value.is_finite())
    }

    /// Wind speed, treating non-finite values as missing.
    #[must_use]
    pub fn measured_wind_speed(&self) -> Option<f64> {
        self.wind_speed.filter(|value| value.is_finite())
    }
}

/// Report whether a timestamp falls on a three-hour forecast boundary
/// (00:00, 03:00, 06:00 UTC and so on).
#[must_use]
pub fn is_three_hour_window(timestamp: DateTime<Utc>) -> bool {
    timestamp.hour() % 3 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use std::str::FromStr;

    fn at_hour(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(90.0, 270.0, WindOrientation::Offshore)]
    #[case(270.0, 270.0, WindOrientation::Onshore)]
    #[case(0.0, 270.0, WindOrientation::Cross)]
    #[case(135.0, 0.0, WindOrientation::CrossOffshore)]
    #[case(225.0, 0.0, WindOrientation::CrossOffshore)]
    #[case(45.0, 0.0, WindOrientation::CrossOnshore)]
    #[case(315.0, 0.0, WindOrientation::CrossOnshore)]
    #[case(150.0, 0.0, WindOrientation::Offshore)]
    #[case(210.0, 0.0, WindOrientation::Offshore)]
    #[case(330.0, 0.0, WindOrientation::Onshore)]
    #[case(-90.0, 90.0, WindOrientation::Offshore)]
    fn orientation_follows_relative_angle(
        #[case] wind: f64,
        #[case] beach: f64,
        #[case] expected: WindOrientation,
    ) {
        assert_eq!(WindOrientation::from_directions(wind, beach), Some(expected));
    }

    #[rstest]
    fn orientation_requires_finite_angles() {
        assert!(WindOrientation::from_directions(f64::NAN, 0.0).is_none());
        assert!(WindOrientation::from_directions(0.0, f64::INFINITY).is_none());
    }

    #[rstest]
    fn orientation_labels_parse() {
        for orientation in WindOrientation::ALL {
            assert_eq!(WindOrientation::from_str(orientation.as_str()), Ok(orientation));
        }
        assert!(WindOrientation::from_str("sideways").is_err());
    }

    #[rstest]
    fn oriented_to_derives_from_wind_direction() {
        let forecast = ForecastObservation::at(at_hour(6))
            .with_wind_direction(90.0)
            .oriented_to(270.0);
        assert_eq!(forecast.wind_orientation, Some(WindOrientation::Offshore));

        let calm = ForecastObservation::at(at_hour(6)).oriented_to(270.0);
        assert!(calm.wind_orientation.is_none());
    }

    #[rstest]
    fn measured_values_drop_non_finite() {
        let forecast = ForecastObservation::at(at_hour(9))
            .with_wave_height(f64::NAN)
            .with_wind_speed(4.0);
        assert!(forecast.measured_wave_height().is_none());
        assert_eq!(forecast.measured_wind_speed(), Some(4.0));
    }

    #[rstest]
    #[case(0, true)]
    #[case(3, true)]
    #[case(4, false)]
    #[case(21, true)]
    #[case(22, false)]
    fn three_hour_windows(#[case] hour: u32, #[case] expected: bool) {
        assert_eq!(is_three_hour_window(at_hour(hour)), expected);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_source_field_names() {
        let json = r#"{
            "timestamp_utc": "2024-05-10T06:00:00Z",
            "wave_height": 1.2,
            "wind_orientation": "cross-offshore"
        }"#;
        let forecast: ForecastObservation = serde_json::from_str(json).expect("valid forecast");
        assert_eq!(forecast.timestamp, at_hour(6));
        assert_eq!(forecast.wind_orientation, Some(WindOrientation::CrossOffshore));
        assert!(forecast.wind_speed.is_none());
    }
}
