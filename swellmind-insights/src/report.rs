//! Everything shown on a user's insights page.

use chrono::{DateTime, Utc};
use serde::Serialize;
use swellmind_core::{SessionRecord, TrainingSample};

use crate::{
    InsightsAvailability, SessionStatistics, UserInsights, calculate_insights, recommendations,
};

/// Insights, statistics and advice for one user.
///
/// # Examples
/// ```
/// use swellmind_core::test_support::{alternating_sessions, july};
/// use swellmind_insights::InsightsReport;
///
/// let pending = InsightsReport::build(&alternating_sessions(2), july(30, 0));
/// assert!(pending.insights.is_none());
/// assert_eq!(pending.sessions_needed, 1);
///
/// let ready = InsightsReport::build(&alternating_sessions(6), july(30, 0));
/// assert!(ready.insights.is_some());
/// assert!(ready.message.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    /// Preference summary; absent until enough good sessions are linked.
    pub insights: Option<UserInsights>,
    /// Prompt shown while more sessions are needed.
    pub message: Option<String>,
    /// Sessions still to log before insights unlock.
    pub sessions_needed: usize,
    /// Session statistics.
    pub statistics: SessionStatistics,
    /// Suggestions for the user.
    pub recommendations: Vec<String>,
}

impl InsightsReport {
    /// Build the report for a user's full history as of `now`.
    ///
    /// Only sessions with a linked forecast count towards availability,
    /// insights and recommendations.
    #[must_use]
    pub fn build(sessions: &[SessionRecord], now: DateTime<Utc>) -> Self {
        let samples = TrainingSample::from_sessions(sessions);
        let availability = InsightsAvailability::evaluate(samples.len());
        let insights = match availability {
            InsightsAvailability::Ready => calculate_insights(&samples),
            InsightsAvailability::NeedMoreSessions { .. } => None,
        };
        let sessions_needed = match availability {
            InsightsAvailability::Ready => 0,
            InsightsAvailability::NeedMoreSessions { needed, .. } => needed,
        };
        Self {
            recommendations: recommendations(insights.as_ref(), samples.len()),
            insights,
            message: availability.message(),
            sessions_needed,
            statistics: SessionStatistics::from_sessions(sessions, now),
        }
    }
}
