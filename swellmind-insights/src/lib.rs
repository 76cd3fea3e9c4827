//! Preference insights derived from a user's logged sessions.
//!
//! The aggregator looks only at sessions with a linked forecast. It never
//! consults the trainer or the scorers, so insights can be computed on
//! demand for any history:
//! - [`calculate_insights`] summarises the conditions of the user's good
//!   sessions (rated 7 or more).
//! - [`SessionStatistics`] counts sessions, ratings and spots and reports the
//!   recent rating [`Trend`].
//! - [`recommendations`] turns insights into short suggestions, and
//!   [`InsightsAvailability`] explains how many more sessions are needed.
//!
//! [`InsightsReport`] bundles all of the above for display.

#![forbid(unsafe_code)]

mod aggregate;
mod recommendations;
mod report;
mod statistics;

pub use aggregate::{
    DEFAULT_CROWD_TOLERANCE, GOOD_SESSION_RATING, MIN_INSIGHT_SESSIONS, ModelConfidence,
    UserInsights, calculate_insights,
};
pub use recommendations::{InsightsAvailability, recommendations};
pub use report::InsightsReport;
pub use statistics::{BestSpot, SessionStatistics, TREND_THRESHOLD, Trend};
