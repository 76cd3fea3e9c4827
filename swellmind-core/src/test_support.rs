//! Fixtures shared by unit and behaviour tests across the workspace.
//!
//! Helpers panic on invalid input; they are meant for hard-coded test data.

use chrono::{DateTime, TimeZone, Utc};

use crate::{ForecastObservation, Rating, SessionRecord, TrainingSample, WindOrientation};

/// Timestamp on a fixed July 2024 calendar, at the top of `hour`.
///
/// # Panics
/// Panics when `day` or `hour` do not form a valid date.
#[must_use]
pub fn july(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, day, hour, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid test timestamp: day {day}, hour {hour}"))
}

/// Build a rating from a literal.
///
/// # Panics
/// Panics when `value` is outside `1..=10`.
#[must_use]
pub fn rating(value: u8) -> Rating {
    Rating::new(value).unwrap_or_else(|err| panic!("invalid test rating: {err}"))
}

/// A clean offshore window: 1.5 m at 10 s with 3 m/s of wind.
#[must_use]
pub fn clean_forecast(timestamp: DateTime<Utc>) -> ForecastObservation {
    ForecastObservation::at(timestamp)
        .with_wave_height(1.5)
        .with_wave_period(10.0)
        .with_wind_speed(3.0)
        .with_wind_orientation(WindOrientation::Offshore)
}

/// A blown-out onshore window: 0.3 m at 6 s with 12 m/s of wind.
#[must_use]
pub fn messy_forecast(timestamp: DateTime<Utc>) -> ForecastObservation {
    ForecastObservation::at(timestamp)
        .with_wave_height(0.3)
        .with_wave_period(6.0)
        .with_wind_speed(12.0)
        .with_wind_orientation(WindOrientation::Onshore)
}

/// Session at `spot` linked to `forecast`, surfed at the forecast's time.
#[must_use]
pub fn linked_session(
    spot: &str,
    forecast: ForecastObservation,
    rating_value: u8,
) -> SessionRecord {
    SessionRecord::new(spot, forecast.timestamp, rating(rating_value)).with_forecast(forecast)
}

/// Alternate clean and messy sessions, rating the clean ones highly.
///
/// Sessions fall on consecutive July days at 06:00.
#[must_use]
pub fn alternating_sessions(count: u32) -> Vec<SessionRecord> {
    (0..count)
        .map(|index| {
            let at = july(1 + index % 28, 6);
            if index % 2 == 0 {
                linked_session("pipeline", clean_forecast(at), 9)
            } else {
                linked_session("pipeline", messy_forecast(at), 3)
            }
        })
        .collect()
}

/// Training samples derived from [`alternating_sessions`].
#[must_use]
pub fn alternating_samples(count: u32) -> Vec<TrainingSample> {
    TrainingSample::from_sessions(&alternating_sessions(count))
}

/// Ten linked sessions spread across sizes, winds and times of day.
///
/// Clean offshore sessions are rated highly and blown-out onshore ones
/// poorly, and every feature varies, so a least-squares fit is well posed.
#[must_use]
pub fn varied_sessions() -> Vec<SessionRecord> {
    use WindOrientation::{Cross, CrossOffshore, CrossOnshore, Offshore, Onshore};

    [
        (1, 6, 1.5, 12.0, 2.0, Offshore, 9),
        (2, 9, 0.4, 6.0, 14.0, Onshore, 2),
        (3, 13, 1.2, 10.0, 5.0, CrossOffshore, 7),
        (4, 16, 0.8, 8.0, 9.0, Cross, 5),
        (5, 19, 2.0, 14.0, 4.0, Offshore, 8),
        (6, 6, 0.6, 7.0, 11.0, CrossOnshore, 3),
        (7, 9, 1.8, 11.0, 3.0, Offshore, 9),
        (8, 13, 0.5, 9.0, 13.0, Onshore, 2),
        (9, 16, 1.4, 13.0, 6.0, Cross, 6),
        (10, 19, 1.0, 8.0, 8.0, CrossOnshore, 4),
    ]
    .into_iter()
    .map(|(day, hour, height, period, wind, orientation, value)| {
        let forecast = ForecastObservation::at(july(day, hour))
            .with_wave_height(height)
            .with_wave_period(period)
            .with_wind_speed(wind)
            .with_wind_orientation(orientation);
        linked_session("pipeline", forecast, value)
    })
    .collect()
}
