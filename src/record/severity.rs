//! Severity levels.
//!
//! Lower number means more severe. A record passes a threshold `T` when
//! `severity <= T`, so `Fatal` always passes and `Click` only passes a
//! `Click` threshold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;

/// Ordered log severity, 1 (most severe) to 6 (least severe).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Severity {
    Fatal = 1,
    Error = 2,
    Warning = 3,
    Notice = 4,
    #[default]
    Debug = 5,
    Click = 6,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 6] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Debug,
        Severity::Click,
    ];

    /// Numeric code (1..=6).
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Map a numeric code back to a severity.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Severity::Fatal),
            2 => Some(Severity::Error),
            3 => Some(Severity::Warning),
            4 => Some(Severity::Notice),
            5 => Some(Severity::Debug),
            6 => Some(Severity::Click),
            _ => None,
        }
    }

    /// True if a record of this severity passes `threshold`.
    pub fn is_loggable(self, threshold: Severity) -> bool {
        self <= threshold
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Notice => "NOTICE",
            Severity::Debug => "DEBUG",
            Severity::Click => "CLICK",
        }
    }

    /// Validate a caller-supplied numeric threshold.
    pub fn threshold(value: i64) -> Result<Self, LoggerError> {
        Self::from_code(value).ok_or_else(|| {
            LoggerError::Configuration(format!(
                "Invalid Log Level: {} (expected 1..=6)",
                value
            ))
        })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.code()
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, String> {
        Severity::from_code(code as i64).ok_or_else(|| format!("invalid severity code {}", code))
    }
}

/// Parses either a number (`"2"`) or a name (`"error"`, `"warn"`).
impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Severity::threshold(code);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "notice" => Ok(Severity::Notice),
            "debug" => Ok(Severity::Debug),
            "click" => Ok(Severity::Click),
            _ => Err(LoggerError::Configuration(format!(
                "Invalid Log Level: {:?}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_matches_codes() {
        assert!(Severity::Fatal < Severity::Error);
        assert!(Severity::Debug < Severity::Click);
        for (i, severity) in Severity::ALL.iter().enumerate() {
            assert_eq!(severity.code() as usize, i + 1);
        }
    }

    #[test]
    fn test_loggable_against_threshold() {
        assert!(Severity::Fatal.is_loggable(Severity::Fatal));
        assert!(Severity::Debug.is_loggable(Severity::Debug));
        assert!(!Severity::Click.is_loggable(Severity::Debug));
        assert!(!Severity::Warning.is_loggable(Severity::Error));
    }

    #[test]
    fn test_parse_names_and_numbers() {
        assert_eq!("2".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!(" CLICK ".parse::<Severity>().unwrap(), Severity::Click);
        assert!("verbose".parse::<Severity>().is_err());
        assert!("0".parse::<Severity>().is_err());
        assert!("7".parse::<Severity>().is_err());
    }

    #[test]
    fn test_serde_as_code() {
        assert_eq!(serde_json::to_string(&Severity::Notice).unwrap(), "4");
        let parsed: Severity = serde_json::from_str("6").unwrap();
        assert_eq!(parsed, Severity::Click);
        assert!(serde_json::from_str::<Severity>("9").is_err());
    }
}
