use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Wall-clock span between two transcript timestamps, in whole minutes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Elapsed(i64);

impl Elapsed {
    /// Create from minutes
    pub fn new(minutes: i64) -> Self {
        Elapsed(minutes.max(0))
    }

    /// Span from `start` to `end`. Unparsable timestamps yield zero.
    pub fn between(start: &str, end: &str) -> Self {
        match (parse_timestamp(start), parse_timestamp(end)) {
            (Some(start), Some(end)) => Self::new(end.signed_duration_since(start).num_minutes()),
            _ => Elapsed(0),
        }
    }

    #[inline]
    pub fn minutes(&self) -> i64 {
        self.0
    }

    /// Format as a readable string (e.g., "2h 30m")
    pub fn to_formatted_string(&self) -> String {
        if self.0 < 60 {
            format!("{}m", self.0)
        } else {
            let hours = self.0 / 60;
            let mins = self.0 % 60;
            format!("{}h {}m", hours, mins)
        }
    }
}

fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    timestamp.parse::<DateTime<Utc>>().ok()
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_formatted_string())
    }
}

impl Serialize for Elapsed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<i64> for Elapsed {
    fn from(minutes: i64) -> Self {
        Elapsed::new(minutes)
    }
}
