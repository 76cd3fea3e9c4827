//! Logged surf sessions and the training samples derived from them.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::ForecastObservation;

/// Largest gap between a session and the forecast window it is linked to.
pub const FORECAST_LINK_TOLERANCE: Duration = Duration::minutes(90);

/// Opaque identifier of a user, as issued by the account system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct UserId(String);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Overall session quality on a 1–10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Rating(u8);

/// Errors returned by [`Rating::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    /// The value was outside `1..=10`.
    #[error("rating {value} must be between 1 and 10")]
    OutOfRange {
        /// Rejected value.
        value: u8,
    },
}

impl Rating {
    /// Lowest rating a user can give.
    pub const MIN: Self = Self(1);
    /// Highest rating a user can give.
    pub const MAX: Self = Self(10);

    /// Validate and construct a rating.
    ///
    /// # Errors
    /// Returns [`RatingError::OutOfRange`] for values outside `1..=10`.
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if value >= 1 && value <= 10 {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange { value })
        }
    }

    /// Return the raw value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Return the rating as a regression target.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// One logged surf outing.
///
/// The linked forecast is absent when no forecast window was close enough to
/// the session time; such sessions are kept for statistics but never used for
/// training or insights.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionRecord {
    /// Spot the session took place at.
    pub spot_id: String,
    /// When the user was in the water.
    #[cfg_attr(feature = "serde", serde(alias = "surf_timestamp_utc"))]
    pub surfed_at: DateTime<Utc>,
    /// Self-reported overall quality.
    #[cfg_attr(feature = "serde", serde(alias = "overall_rating"))]
    pub rating: Rating,
    /// Forecast window linked to the session, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub forecast: Option<ForecastObservation>,
}

impl SessionRecord {
    /// Construct a session without a linked forecast.
    #[must_use]
    pub fn new(spot_id: impl Into<String>, surfed_at: DateTime<Utc>, rating: Rating) -> Self {
        Self {
            spot_id: spot_id.into(),
            surfed_at,
            rating,
            forecast: None,
        }
    }

    /// Attach the forecast window the session was surfed in.
    #[must_use]
    pub fn with_forecast(mut self, forecast: ForecastObservation) -> Self {
        self.forecast = Some(forecast);
        self
    }

    /// Attach the nearest candidate forecast, if one lies within
    /// [`FORECAST_LINK_TOLERANCE`].
    #[must_use]
    pub fn linked_to_nearest<'a, I>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = &'a ForecastObservation>,
    {
        self.forecast = link_nearest_forecast(self.surfed_at, candidates).cloned();
        self
    }
}

/// A `{forecast, rating}` pair used for training and insights.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainingSample {
    /// Conditions the session was surfed in.
    pub forecast: ForecastObservation,
    /// How the user rated it.
    pub rating: Rating,
}

impl TrainingSample {
    /// Pair a forecast with a rating.
    #[must_use]
    pub const fn new(forecast: ForecastObservation, rating: Rating) -> Self {
        Self { forecast, rating }
    }

    /// Keep only sessions with a linked forecast, preserving input order.
    #[must_use]
    pub fn from_sessions(sessions: &[SessionRecord]) -> Vec<Self> {
        sessions
            .iter()
            .filter_map(|session| {
                session
                    .forecast
                    .as_ref()
                    .map(|forecast| Self::new(forecast.clone(), session.rating))
            })
            .collect()
    }
}

/// Pick the forecast closest in time to `surfed_at`.
///
/// Only candidates within [`FORECAST_LINK_TOLERANCE`] either side qualify.
/// When two candidates are equally close the earlier forecast wins,
/// whatever order the candidates arrive in.
#[must_use]
pub fn link_nearest_forecast<'a, I>(
    surfed_at: DateTime<Utc>,
    candidates: I,
) -> Option<&'a ForecastObservation>
where
    I: IntoIterator<Item = &'a ForecastObservation>,
{
    candidates
        .into_iter()
        .map(|candidate| ((candidate.timestamp - surfed_at).abs(), candidate))
        .filter(|(gap, _)| *gap <= FORECAST_LINK_TOLERANCE)
        .min_by_key(|(gap, candidate)| (*gap, candidate.timestamp))
        .map(|(_, forecast)| forecast)
}
