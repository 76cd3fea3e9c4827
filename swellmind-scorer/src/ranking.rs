//! Scoring and ordering a forecast horizon.

use chrono::{DateTime, Utc};
use swellmind_core::{ForecastObservation, Scorer, ScoringResult, UserModel, UserPreferences};

use crate::WindowScorer;

/// Windows kept on each side of `now`: one week of hourly slots.
pub const DEFAULT_WINDOW_LIMIT: usize = 168;

/// A forecast window paired with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWindow {
    /// The window that was scored.
    pub forecast: ForecastObservation,
    /// Its score for the user.
    pub result: ScoringResult,
}

/// Score `windows` for a user and order them for display.
///
/// Upcoming windows (starting at or after `now`) come first, best score
/// first; windows with equal scores keep their input order. Past windows
/// follow, newest first. Each group is truncated to `limit` entries.
///
/// # Examples
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use swellmind_core::{ForecastObservation, UserPreferences};
/// use swellmind_scorer::{DEFAULT_WINDOW_LIMIT, rank_windows};
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
/// let windows: Vec<_> = (-2..3)
///     .map(|step| ForecastObservation::at(now + Duration::hours(3 * step)))
///     .collect();
/// let ranked = rank_windows(&windows, &UserPreferences::default(), None, 0, now, DEFAULT_WINDOW_LIMIT);
/// assert_eq!(ranked.len(), 5);
/// assert!(ranked[0].forecast.timestamp >= now);
/// assert!(ranked[4].forecast.timestamp < now);
/// ```
#[must_use]
pub fn rank_windows(
    windows: &[ForecastObservation],
    preferences: &UserPreferences,
    model: Option<&UserModel>,
    session_count: usize,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<ScoredWindow> {
    let scorer = WindowScorer::select(model, session_count);
    let (mut upcoming, mut past): (Vec<ScoredWindow>, Vec<ScoredWindow>) = windows
        .iter()
        .map(|forecast| ScoredWindow {
            forecast: forecast.clone(),
            result: scorer.score(forecast, preferences),
        })
        .partition(|window| window.forecast.timestamp >= now);

    upcoming.sort_by(|left, right| right.result.score().cmp(&left.result.score()));
    upcoming.truncate(limit);
    past.sort_by(|left, right| right.forecast.timestamp.cmp(&left.forecast.timestamp));
    past.truncate(limit);

    upcoming.extend(past);
    upcoming
}
