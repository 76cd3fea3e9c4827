//! Descriptive statistics over a user's full session history.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use swellmind_core::SessionRecord;

use crate::aggregate::{count_as_f64, mean, round_to_tenth};

/// Length of each trend window, in days.
const TREND_WINDOW_DAYS: i64 = 30;

/// Rating difference between trend windows that counts as a change.
pub const TREND_THRESHOLD: f64 = 0.5;

/// Sessions a spot needs before its average rating is trusted.
const MIN_SPOT_SESSIONS: usize = 2;

/// Direction of the user's recent ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// The last 30 days are rated clearly higher than the 30 before.
    Improving,
    /// The last 30 days are rated clearly lower than the 30 before.
    Declining,
    /// No clear change, or one of the windows has no sessions.
    Stable,
}

impl Trend {
    /// Compare the recent window's average rating with the older one.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "threshold comparison")]
    pub const fn between(recent: Option<f64>, older: Option<f64>) -> Self {
        match (recent, older) {
            (Some(new), Some(old)) if new > old + TREND_THRESHOLD => Self::Improving,
            (Some(new), Some(old)) if new < old - TREND_THRESHOLD => Self::Declining,
            _ => Self::Stable,
        }
    }
}

/// The spot a user surfs best at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSpot {
    /// Spot identifier.
    pub spot_id: String,
    /// Mean rating of the user's sessions there.
    pub avg_rating: f64,
    /// Number of sessions logged there.
    pub sessions: usize,
}

/// Counts and trends over a user's sessions.
///
/// Counts, the rating distribution, the average and the trend cover sessions
/// with a linked forecast. The per-spot breakdown and the best spot cover
/// every session.
///
/// # Examples
/// ```
/// use swellmind_core::test_support::{alternating_sessions, july};
/// use swellmind_insights::{SessionStatistics, Trend};
///
/// let stats = SessionStatistics::from_sessions(&alternating_sessions(4), july(30, 0));
/// assert_eq!(stats.total_sessions, 4);
/// assert_eq!(stats.rating_distribution[8], 2);
/// assert_eq!(stats.trend, Trend::Stable);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatistics {
    /// Number of sessions with a linked forecast.
    pub total_sessions: usize,
    /// Linked sessions surfed within the last 30 days.
    pub sessions_last_30_days: usize,
    /// Mean rating to one decimal place; `None` without sessions.
    pub average_rating: Option<f64>,
    /// Linked session counts per rating; index 0 holds rating 1.
    pub rating_distribution: [usize; 10],
    /// Session counts per spot, linked or not.
    pub sessions_by_spot: BTreeMap<String, usize>,
    /// Recent rating trend.
    pub trend: Trend,
    /// Best spot, if the user has logged any session.
    pub best_spot: Option<BestSpot>,
}

#[derive(Debug, Clone, Copy)]
struct SpotTally {
    first_seen: usize,
    sessions: usize,
    rating_total: u64,
}

impl SpotTally {
    const fn average(self) -> f64 {
        mean_of_total(self.rating_total, self.sessions)
    }

    /// Order by mean rating without dividing.
    fn cmp_average(self, other: Self) -> Ordering {
        let lhs = u128::from(self.rating_total) * other.sessions as u128;
        let rhs = u128::from(other.rating_total) * self.sessions as u128;
        lhs.cmp(&rhs)
    }
}

impl SessionStatistics {
    /// Summarise `sessions` as of `now`.
    ///
    /// The trend compares the mean rating of linked sessions within 30 days
    /// of `now` with that of the 30 days before. The best spot is the highest
    /// rated spot with at least two sessions, falling back to the most
    /// frequented spot; ties go to the spot logged first.
    #[must_use]
    pub fn from_sessions(sessions: &[SessionRecord], now: DateTime<Utc>) -> Self {
        let linked: Vec<&SessionRecord> = sessions
            .iter()
            .filter(|session| session.forecast.is_some())
            .collect();
        let recent_start = now - TimeDelta::days(TREND_WINDOW_DAYS);
        let older_start = recent_start - TimeDelta::days(TREND_WINDOW_DAYS);
        let recent: Vec<&SessionRecord> = linked
            .iter()
            .copied()
            .filter(|session| session.surfed_at >= recent_start)
            .collect();
        let older = linked.iter().filter(|session| {
            session.surfed_at >= older_start && session.surfed_at < recent_start
        });

        let mut rating_distribution = [0; 10];
        for session in &linked {
            let bucket = usize::from(session.rating.get()).saturating_sub(1);
            if let Some(slot) = rating_distribution.get_mut(bucket) {
                *slot += 1;
            }
        }

        let tallies = tally_spots(sessions);
        Self {
            total_sessions: linked.len(),
            sessions_last_30_days: recent.len(),
            average_rating: mean(linked.iter().map(|s| s.rating.as_f64())).map(round_to_tenth),
            rating_distribution,
            sessions_by_spot: tallies
                .iter()
                .map(|(spot, tally)| ((*spot).to_owned(), tally.sessions))
                .collect(),
            trend: Trend::between(
                mean(recent.iter().map(|s| s.rating.as_f64())),
                mean(older.map(|s| s.rating.as_f64())),
            ),
            best_spot: best_spot(&tallies),
        }
    }
}

fn tally_spots(sessions: &[SessionRecord]) -> BTreeMap<&str, SpotTally> {
    let mut tallies: BTreeMap<&str, SpotTally> = BTreeMap::new();
    for (position, session) in sessions.iter().enumerate() {
        let tally = tallies
            .entry(session.spot_id.as_str())
            .or_insert(SpotTally {
                first_seen: position,
                sessions: 0,
                rating_total: 0,
            });
        tally.sessions += 1;
        tally.rating_total += u64::from(session.rating.get());
    }
    tallies
}

fn best_spot(tallies: &BTreeMap<&str, SpotTally>) -> Option<BestSpot> {
    let first_seen = |a: &(&&str, &SpotTally), b: &(&&str, &SpotTally)| {
        b.1.first_seen.cmp(&a.1.first_seen)
    };
    let highest_rated = tallies
        .iter()
        .filter(|(_, tally)| tally.sessions >= MIN_SPOT_SESSIONS)
        .max_by(|a, b| a.1.cmp_average(*b.1).then_with(|| first_seen(a, b)));
    let chosen = highest_rated.or_else(|| {
        tallies
            .iter()
            .max_by(|a, b| a.1.sessions.cmp(&b.1.sessions).then_with(|| first_seen(a, b)))
    })?;
    let (spot, tally) = chosen;
    Some(BestSpot {
        spot_id: (*spot).to_owned(),
        avg_rating: tally.average(),
        sessions: tally.sessions,
    })
}

#[expect(clippy::float_arithmetic, reason = "averaging")]
#[expect(clippy::cast_precision_loss, reason = "rating totals stay small")]
const fn mean_of_total(total: u64, count: usize) -> f64 {
    total as f64 / count_as_f64(count)
}

#[cfg(test)]
mod tests {
    //! Unit tests for session statistics.
    #![expect(
        clippy::expect_used,
        clippy::float_arithmetic,
        reason = "tests fail fast and compare averages"
    )]

    use super::*;
    use rstest::rstest;
    use swellmind_core::ForecastObservation;
    use swellmind_core::test_support::{july, rating};

    fn session(spot: &str, at: DateTime<Utc>, value: u8) -> SessionRecord {
        unlinked(spot, at, value).with_forecast(ForecastObservation::at(at))
    }

    fn unlinked(spot: &str, at: DateTime<Utc>, value: u8) -> SessionRecord {
        SessionRecord::new(spot, at, rating(value))
    }

    #[rstest]
    #[case(Some(7.0), Some(6.0), Trend::Improving)]
    #[case(Some(6.5), Some(6.0), Trend::Stable)]
    #[case(Some(5.0), Some(6.0), Trend::Declining)]
    #[case(None, Some(6.0), Trend::Stable)]
    #[case(Some(9.0), None, Trend::Stable)]
    fn trend_uses_half_point_threshold(
        #[case] recent: Option<f64>,
        #[case] older: Option<f64>,
        #[case] expected: Trend,
    ) {
        assert_eq!(Trend::between(recent, older), expected);
    }

    #[rstest]
    fn empty_history_has_no_best_spot() {
        let stats = SessionStatistics::from_sessions(&[], july(1, 0));
        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.average_rating, None);
        assert_eq!(stats.best_spot, None);
        assert_eq!(stats.trend, Trend::Stable);
    }

    #[rstest]
    fn windows_split_at_thirty_days() {
        let now = july(31, 12);
        let sessions = vec![
            session("a", july(30, 8), 9),
            session("a", july(15, 8), 8),
            session("a", july(1, 8), 5),
            session("a", now - TimeDelta::days(45), 6),
            session("a", now - TimeDelta::days(90), 1),
        ];
        let stats = SessionStatistics::from_sessions(&sessions, now);
        assert_eq!(stats.sessions_last_30_days, 2);
        // Recent 8.5 against older 5.5.
        assert_eq!(stats.trend, Trend::Improving);
        assert_eq!(stats.rating_distribution, [1, 0, 0, 0, 1, 1, 0, 1, 1, 0]);
        assert_eq!(stats.average_rating, Some(5.8));
    }

    #[rstest]
    fn best_spot_needs_two_sessions() {
        let sessions = vec![
            session("reef", july(1, 8), 10),
            session("beach", july(2, 8), 6),
            session("beach", july(3, 8), 8),
            session("point", july(4, 8), 7),
            session("point", july(5, 8), 7),
        ];
        let stats = SessionStatistics::from_sessions(&sessions, july(6, 0));
        let best = stats.best_spot.expect("best spot");
        assert_eq!(best.spot_id, "beach");
        assert!((best.avg_rating - 7.0).abs() < 1e-9);
        assert_eq!(best.sessions, 2);
        assert_eq!(stats.sessions_by_spot.get("reef"), Some(&1));
    }

    #[rstest]
    fn most_frequented_spot_is_the_fallback() {
        let sessions = vec![
            session("reef", july(1, 8), 3),
            session("beach", july(2, 8), 9),
        ];
        let stats = SessionStatistics::from_sessions(&sessions, july(6, 0));
        let best = stats.best_spot.expect("best spot");
        assert_eq!(best.spot_id, "reef");
        assert!((best.avg_rating - 3.0).abs() < 1e-9);
    }

    #[rstest]
    fn unlinked_sessions_only_feed_the_spot_breakdown() {
        let now = july(10, 0);
        let sessions = vec![
            session("beach", july(8, 8), 4),
            unlinked("reef", july(7, 8), 10),
            unlinked("reef", july(6, 8), 10),
        ];
        let stats = SessionStatistics::from_sessions(&sessions, now);
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.sessions_last_30_days, 1);
        assert_eq!(stats.average_rating, Some(4.0));
        assert_eq!(stats.rating_distribution.iter().sum::<usize>(), 1);
        assert_eq!(stats.sessions_by_spot.get("reef"), Some(&2));
        let best = stats.best_spot.expect("best spot");
        assert_eq!(best.spot_id, "reef");
        assert_eq!(best.sessions, 2);
    }
}
