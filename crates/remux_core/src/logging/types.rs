//! Logging types.

use serde::{Deserialize, Serialize};

/// Log level for filtering messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace-level debugging (very verbose).
    Trace,
    /// Debug information, including every external command line.
    Debug,
    /// General information.
    #[default]
    Info,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
}

impl LogLevel {
    /// Filter directive for `EnvFilter`.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Shift the level by a verbosity delta: positive is more verbose.
    pub fn adjusted(self, delta: i8) -> Self {
        const ORDER: [LogLevel; 5] = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        let current = ORDER.iter().position(|l| *l == self).unwrap_or(2) as i16;
        let idx = (current + delta as i16).clamp(0, ORDER.len() as i16 - 1);
        ORDER[idx as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(LogLevel::Debug.as_filter_str(), "debug");
        assert_eq!(LogLevel::Info.as_filter_str(), "info");
    }

    #[test]
    fn adjusted_clamps() {
        assert_eq!(LogLevel::Info.adjusted(1), LogLevel::Debug);
        assert_eq!(LogLevel::Info.adjusted(5), LogLevel::Trace);
        assert_eq!(LogLevel::Info.adjusted(-1), LogLevel::Warn);
        assert_eq!(LogLevel::Warn.adjusted(-9), LogLevel::Error);
    }
}
