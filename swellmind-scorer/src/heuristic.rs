//! Rule-based scoring used before a user has a trained model.

use swellmind_core::{
    ForecastObservation, Scorer, ScoringResult, TimeOfDay, UserPreferences, WindOrientation,
    round_score,
};

const PERFECT: f64 = 100.0;
const MISSING_WAVE_HEIGHT: f64 = 50.0;
const MISSING_WIND_ORIENTATION: f64 = 50.0;
const MISSING_WIND_SPEED: f64 = 60.0;
const PENALTY_PER_METRE_BELOW: f64 = 40.0;
const PENALTY_PER_METRE_ABOVE: f64 = 30.0;
const PREFERRED_TIME_BONUS: f64 = 10.0;

/// Sub-scores at or above this value earn a positive explanation clause.
const FAVOURABLE: f64 = 80.0;
/// Orientation sub-scores below this value earn a warning clause.
const UNFAVOURABLE: f64 = 50.0;

const FALLBACK_EXPLANATION: &str = "Based on general conditions";

/// Relative importance of each condition in the composite score.
///
/// The weights are applied as given; they are expected to sum to one so the
/// composite stays on the 0–100 scale of the sub-scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicWeights {
    /// Weight of the wave-height sub-score.
    pub wave_height: f64,
    /// Weight of the wind-orientation sub-score.
    pub wind_orientation: f64,
    /// Weight of the wind-speed sub-score.
    pub wind_speed: f64,
    /// Weight of the time-of-day sub-score.
    pub time_of_day: f64,
}

impl HeuristicWeights {
    /// Waves 40%, wind orientation 25%, wind speed 20%, time of day 15%.
    pub const STANDARD: Self = Self {
        wave_height: 0.40,
        wind_orientation: 0.25,
        wind_speed: 0.20,
        time_of_day: 0.15,
    };

    /// Weighted sum of a breakdown, evaluated wave, orientation, speed, time.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "weighted sum of sub-scores")]
    pub const fn combine(&self, breakdown: &HeuristicBreakdown) -> f64 {
        breakdown.wave_height * self.wave_height
            + breakdown.wind_orientation * self.wind_orientation
            + breakdown.wind_speed * self.wind_speed
            + breakdown.time_of_day * self.time_of_day
    }
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// The four 0–100 sub-scores behind a heuristic score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicBreakdown {
    /// Closeness of the wave height to the user's ideal range.
    pub wave_height: f64,
    /// Quality of the wind direction relative to the spot.
    pub wind_orientation: f64,
    /// Calmness of the wind.
    pub wind_speed: f64,
    /// Desirability of the window's time of day.
    pub time_of_day: f64,
}

impl HeuristicBreakdown {
    /// Evaluate every sub-score for a forecast.
    #[must_use]
    pub fn evaluate(forecast: &ForecastObservation, preferences: &UserPreferences) -> Self {
        Self {
            wave_height: wave_height_score(forecast.measured_wave_height(), preferences),
            wind_orientation: wind_orientation_score(forecast.wind_orientation),
            wind_speed: wind_speed_score(forecast.measured_wind_speed()),
            time_of_day: time_of_day_score(forecast.time_of_day(), preferences),
        }
    }
}

/// Score a wave height against the user's ideal range.
///
/// Heights inside the range (inclusive) score 100. Below it the score drops
/// 40 points per metre of shortfall, above it 30 points per metre of excess,
/// never below zero. A missing height scores a neutral 50.
///
/// # Examples
/// ```
/// use swellmind_core::UserPreferences;
/// use swellmind_scorer::wave_height_score;
///
/// let prefs = UserPreferences::new(1.0, 2.0, 5, []).unwrap();
/// assert_eq!(wave_height_score(Some(1.5), &prefs), 100.0);
/// assert_eq!(wave_height_score(Some(0.5), &prefs), 80.0);
/// assert_eq!(wave_height_score(None, &prefs), 50.0);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "linear distance penalty")]
pub const fn wave_height_score(height: Option<f64>, preferences: &UserPreferences) -> f64 {
    let Some(metres) = height else {
        return MISSING_WAVE_HEIGHT;
    };
    let penalty = if metres < preferences.ideal_wave_size_min {
        (preferences.ideal_wave_size_min - metres) * PENALTY_PER_METRE_BELOW
    } else if metres > preferences.ideal_wave_size_max {
        (metres - preferences.ideal_wave_size_max) * PENALTY_PER_METRE_ABOVE
    } else {
        0.0
    };
    let score = PERFECT - penalty;
    if score > 0.0 { score } else { 0.0 }
}

/// Score a wind orientation; offshore is best, onshore worst.
#[must_use]
pub const fn wind_orientation_score(orientation: Option<WindOrientation>) -> f64 {
    match orientation {
        Some(WindOrientation::Offshore) => 100.0,
        Some(WindOrientation::CrossOffshore) => 85.0,
        Some(WindOrientation::Cross) => 60.0,
        Some(WindOrientation::CrossOnshore) => 35.0,
        Some(WindOrientation::Onshore) => 15.0,
        None => MISSING_WIND_ORIENTATION,
    }
}

/// Score a wind speed in metres per second; calm is best.
#[must_use]
pub const fn wind_speed_score(speed: Option<f64>) -> f64 {
    match speed {
        None => MISSING_WIND_SPEED,
        Some(value) if value <= 3.0 => 100.0,
        Some(value) if value <= 6.0 => 85.0,
        Some(value) if value <= 10.0 => 60.0,
        Some(value) if value <= 15.0 => 35.0,
        Some(_) => 15.0,
    }
}

/// Score a time-of-day bucket, adding a bonus (capped at 100) when the user
/// prefers it.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "preference bonus")]
pub fn time_of_day_score(bucket: TimeOfDay, preferences: &UserPreferences) -> f64 {
    let base = match bucket {
        TimeOfDay::Dawn => 90.0,
        TimeOfDay::Morning => 95.0,
        TimeOfDay::Midday => 70.0,
        TimeOfDay::Afternoon => 60.0,
        TimeOfDay::Evening => 50.0,
    };
    if preferences.prefers(bucket) {
        (base + PREFERRED_TIME_BONUS).min(PERFECT)
    } else {
        base
    }
}

/// Scores windows with fixed rules and the user's stated preferences.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use swellmind_core::{ForecastObservation, Scorer, UserPreferences};
/// use swellmind_scorer::HeuristicScorer;
///
/// let at = Utc.with_ymd_and_hms(2024, 6, 1, 21, 0, 0).unwrap();
/// let result = HeuristicScorer::new().score(&ForecastObservation::at(at), &UserPreferences::default());
/// assert_eq!(result.score(), 52);
/// assert_eq!(result.explanation(), "Based on general conditions");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeuristicScorer {
    weights: HeuristicWeights,
}

impl HeuristicScorer {
    /// Create a scorer with [`HeuristicWeights::STANDARD`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            weights: HeuristicWeights::STANDARD,
        }
    }

    /// Replace the composite weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Return the composite weights.
    #[must_use]
    pub const fn weights(&self) -> HeuristicWeights {
        self.weights
    }
}

impl Scorer for HeuristicScorer {
    fn score(
        &self,
        forecast: &ForecastObservation,
        preferences: &UserPreferences,
    ) -> ScoringResult {
        let breakdown = HeuristicBreakdown::evaluate(forecast, preferences);
        let score = round_score(self.weights.combine(&breakdown));
        ScoringResult::new(score, explain(forecast, preferences, &breakdown))
    }
}

fn explain(
    forecast: &ForecastObservation,
    preferences: &UserPreferences,
    breakdown: &HeuristicBreakdown,
) -> String {
    let mut clauses: Vec<String> = Vec::with_capacity(2);

    let height = forecast.measured_wave_height();
    if breakdown.wave_height >= FAVOURABLE {
        clauses.push("waves in your ideal range".to_owned());
    } else if let Some(metres) = height {
        if metres < preferences.ideal_wave_size_min {
            clauses.push("waves a bit small for you".to_owned());
        } else {
            clauses.push("waves bigger than your preference".to_owned());
        }
    }

    if let Some(orientation) = forecast.wind_orientation {
        if breakdown.wind_orientation >= FAVOURABLE {
            clauses.push(format!("{orientation} winds"));
        } else if breakdown.wind_orientation < UNFAVOURABLE {
            clauses.push(format!("{orientation} winds may affect conditions"));
        }
    }

    if clauses.is_empty() {
        FALLBACK_EXPLANATION.to_owned()
    } else {
        capitalise_first(&clauses.join(", "))
    }
}

fn capitalise_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
