//! Time-of-day buckets derived from the UTC hour of a timestamp.
//!
//! Bucketing is shared by feature extraction, heuristic scoring and insight
//! aggregation, so every caller must go through [`TimeOfDay::from_hour`] or
//! [`TimeOfDay::from_timestamp`].
//!
//! # Examples
//! ```
//! use swellmind_core::TimeOfDay;
//!
//! assert_eq!(TimeOfDay::from_hour(7), TimeOfDay::Dawn);
//! assert_eq!(TimeOfDay::Midday.to_string(), "midday");
//! ```

use chrono::{DateTime, Timelike, Utc};

/// Coarse period of the day used to compare sessions and forecasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TimeOfDay {
    /// 05:00 up to 08:00 UTC.
    Dawn,
    /// 08:00 up to 12:00 UTC.
    Morning,
    /// 12:00 up to 15:00 UTC.
    Midday,
    /// 15:00 up to 18:00 UTC.
    Afternoon,
    /// Every remaining hour, including the night.
    Evening,
}

impl TimeOfDay {
    /// Every bucket in chronological order.
    pub const ALL: [Self; 5] = [
        Self::Dawn,
        Self::Morning,
        Self::Midday,
        Self::Afternoon,
        Self::Evening,
    ];

    /// Map a UTC hour onto its bucket.
    ///
    /// The mapping is total: hours outside `0..24` fall into
    /// [`TimeOfDay::Evening`] along with the night hours.
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            5..=7 => Self::Dawn,
            8..=11 => Self::Morning,
            12..=14 => Self::Midday,
            15..=17 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    /// Bucket a timestamp by its UTC hour.
    #[must_use]
    pub fn from_timestamp(timestamp: DateTime<Utc>) -> Self {
        Self::from_hour(timestamp.hour())
    }

    /// Return the bucket as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Morning => "morning",
            Self::Midday => "midday",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dawn" => Ok(Self::Dawn),
            "morning" => Ok(Self::Morning),
            "midday" => Ok(Self::Midday),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            _ => Err(format!("unknown time of day '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(0, TimeOfDay::Evening)]
    #[case(4, TimeOfDay::Evening)]
    #[case(5, TimeOfDay::Dawn)]
    #[case(7, TimeOfDay::Dawn)]
    #[case(8, TimeOfDay::Morning)]
    #[case(11, TimeOfDay::Morning)]
    #[case(12, TimeOfDay::Midday)]
    #[case(14, TimeOfDay::Midday)]
    #[case(15, TimeOfDay::Afternoon)]
    #[case(17, TimeOfDay::Afternoon)]
    #[case(18, TimeOfDay::Evening)]
    #[case(23, TimeOfDay::Evening)]
    fn bucket_boundaries(#[case] hour: u32, #[case] expected: TimeOfDay) {
        assert_eq!(TimeOfDay::from_hour(hour), expected);
    }

    #[rstest]
    fn timestamp_uses_utc_hour() {
        let at = Utc
            .with_ymd_and_hms(2024, 3, 1, 9, 59, 59)
            .single()
            .expect("valid timestamp");
        assert_eq!(TimeOfDay::from_timestamp(at), TimeOfDay::Morning);
    }

    #[rstest]
    fn display_round_trips_through_from_str() {
        for bucket in TimeOfDay::ALL {
            assert_eq!(TimeOfDay::from_str(&bucket.to_string()), Ok(bucket));
        }
    }

    #[rstest]
    fn parsing_rejects_unknown() {
        let err = TimeOfDay::from_str("brunch").unwrap_err();
        assert!(err.contains("unknown time of day"));
    }
}
