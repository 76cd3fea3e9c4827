//! Forecast window scoring for SwellMind.
//!
//! Two [`Scorer`](swellmind_core::Scorer) implementations cover the three
//! scoring phases:
//! - [`HeuristicScorer`] rates a window from fixed surf-quality rules and the
//!   user's stated preferences. It is the only scorer used until a user has
//!   logged enough sessions to train a model.
//! - [`LearnedScorer`] predicts the user's rating with their trained
//!   [`UserModel`](swellmind_core::UserModel) and, while the history is
//!   still short, blends that prediction with the heuristic score.
//!
//! [`WindowScorer::select`] picks between them from the session count, and
//! [`rank_windows`] scores and orders a whole forecast horizon.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use swellmind_core::{ForecastObservation, TimeOfDay, UserPreferences, WindOrientation};
//! use swellmind_scorer::score_window;
//!
//! let at = Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap();
//! let forecast = ForecastObservation::at(at)
//!     .with_wave_height(1.5)
//!     .with_wind_speed(2.0)
//!     .with_wind_orientation(WindOrientation::Offshore);
//! let prefs = UserPreferences::new(1.0, 2.0, 5, [TimeOfDay::Morning]).unwrap();
//!
//! let result = score_window(&forecast, &prefs, None, 0);
//! assert_eq!(result.score(), 99);
//! assert!(result.is_recommended());
//! ```

#![forbid(unsafe_code)]

mod heuristic;
mod learned;
mod ranking;
mod router;

pub use heuristic::{
    HeuristicBreakdown, HeuristicScorer, HeuristicWeights, time_of_day_score,
    wave_height_score, wind_orientation_score, wind_speed_score,
};
pub use learned::{BlendPolicy, LearnedScorer, learned_score};
pub use ranking::{DEFAULT_WINDOW_LIMIT, ScoredWindow, rank_windows};
pub use router::{WindowScorer, score_window};
