//! Candle interval definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle interval, named with venue-style codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    #[serde(rename = "1min")]
    Min1,
    #[serde(rename = "5min")]
    Min5,
    #[default]
    #[serde(rename = "15min")]
    Min15,
    #[serde(rename = "30min")]
    Min30,
    #[serde(rename = "1hour")]
    Hour1,
    #[serde(rename = "4hour")]
    Hour4,
    #[serde(rename = "1day")]
    Day1,
}

impl Interval {
    /// The venue code for this interval.
    pub fn code(&self) -> &'static str {
        match self {
            Interval::Min1 => "1min",
            Interval::Min5 => "5min",
            Interval::Min15 => "15min",
            Interval::Min30 => "30min",
            Interval::Hour1 => "1hour",
            Interval::Hour4 => "4hour",
            Interval::Day1 => "1day",
        }
    }

    /// Duration of the interval in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Interval::Min1 => 60,
            Interval::Min5 => 300,
            Interval::Min15 => 900,
            Interval::Min30 => 1800,
            Interval::Hour1 => 3600,
            Interval::Hour4 => 14400,
            Interval::Day1 => 86400,
        }
    }

    /// Duration of the interval in milliseconds.
    pub fn as_millis(&self) -> u64 {
        self.as_secs() * 1000
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1min" | "1m" => Ok(Interval::Min1),
            "5min" | "5m" => Ok(Interval::Min5),
            "15min" | "15m" => Ok(Interval::Min15),
            "30min" | "30m" => Ok(Interval::Min30),
            "1hour" | "1h" => Ok(Interval::Hour1),
            "4hour" | "4h" => Ok(Interval::Hour4),
            "1day" | "1d" => Ok(Interval::Day1),
            _ => Err(format!("Invalid interval: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_duration() {
        assert_eq!(Interval::Min15.as_secs(), 900);
        assert_eq!(Interval::Hour1.as_secs(), 3600);
        assert_eq!(Interval::Day1.as_millis(), 86_400_000);
    }

    #[test]
    fn test_interval_parse() {
        assert_eq!(Interval::from_str("15min").unwrap(), Interval::Min15);
        assert_eq!(Interval::from_str("1h").unwrap(), Interval::Hour1);
        assert!(Interval::from_str("7min").is_err());
    }

    #[test]
    fn test_interval_display() {
        assert_eq!(Interval::Min15.to_string(), "15min");
        assert_eq!(Interval::Day1.to_string(), "1day");
    }
}
