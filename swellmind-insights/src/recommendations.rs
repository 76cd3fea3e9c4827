//! User-facing suggestions derived from insights.

use swellmind_core::LEARNED_PHASE_SESSIONS;

use crate::{MIN_INSIGHT_SESSIONS, ModelConfidence, UserInsights};

/// Below this many sessions users are nudged to vary spots and conditions.
const VARIETY_SESSIONS: usize = 20;

/// Suggestions for the user, most important first.
///
/// # Examples
/// ```
/// use swellmind_insights::recommendations;
///
/// assert_eq!(
///     recommendations(None, 1),
///     ["Log more sessions to get personalized recommendations"]
/// );
/// ```
#[must_use]
pub fn recommendations(insights: Option<&UserInsights>, session_count: usize) -> Vec<String> {
    let Some(summary) = insights else {
        return vec!["Log more sessions to get personalized recommendations".to_owned()];
    };
    let mut advice = Vec::new();
    if summary.model_confidence == ModelConfidence::Low {
        advice.push(format!(
            "Log {} more sessions for fully personalized predictions",
            LEARNED_PHASE_SESSIONS.saturating_sub(session_count)
        ));
    }
    advice.push(format!(
        "Look for {:.1}-{:.1}m waves with {} winds",
        summary.ideal_wave_height_min, summary.ideal_wave_height_max, summary.preferred_wind
    ));
    advice.push(format!(
        "Your best sessions are usually in the {}",
        summary.preferred_time_of_day
    ));
    if summary.total_sessions < VARIETY_SESSIONS {
        advice.push(
            "Try different spots and conditions to help the model learn your preferences"
                .to_owned(),
        );
    }
    advice
}

/// Whether enough sessions have been logged to show insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightsAvailability {
    /// Insights can be shown.
    Ready,
    /// More sessions are required first.
    NeedMoreSessions {
        /// Sessions still to log.
        needed: usize,
        /// Sessions logged so far.
        logged: usize,
    },
}

impl InsightsAvailability {
    /// Classify a session count.
    ///
    /// # Examples
    /// ```
    /// use swellmind_insights::InsightsAvailability;
    ///
    /// let pending = InsightsAvailability::evaluate(1);
    /// assert_eq!(
    ///     pending.message().as_deref(),
    ///     Some("Log 2 more session(s) to unlock insights")
    /// );
    /// assert_eq!(InsightsAvailability::evaluate(3), InsightsAvailability::Ready);
    /// ```
    #[must_use]
    pub const fn evaluate(session_count: usize) -> Self {
        if session_count >= MIN_INSIGHT_SESSIONS {
            Self::Ready
        } else {
            Self::NeedMoreSessions {
                needed: MIN_INSIGHT_SESSIONS - session_count,
                logged: session_count,
            }
        }
    }

    /// Message explaining what the user still has to do, if anything.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match *self {
            Self::Ready => None,
            Self::NeedMoreSessions { logged: 0, .. } => {
                Some("Log some sessions to see your insights!".to_owned())
            }
            Self::NeedMoreSessions { needed, .. } => {
                Some(format!("Log {needed} more session(s) to unlock insights"))
            }
        }
    }
}
