use std::fmt;

use serde::Serialize;

/// Severity of an issue.
///
/// The wire encoding descends with severity: `Error = 1`, `Warning = 2`,
/// `Info = 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error = 1,
    Warning = 2,
    Info = 3,
}

impl IssueLevel {
    pub const ALL: [Self; 3] = [Self::Error, Self::Warning, Self::Info];

    /// Numeric code used in `.xqar` and configuration files.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            3 => Some(Self::Info),
            _ => None,
        }
    }

    /// Parses the numeric wire form, e.g. `"2"`.
    #[must_use]
    pub fn parse_code(text: &str) -> Option<Self> {
        text.trim().parse().ok().and_then(Self::from_code)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }

    /// True when `self` lies between `max` (most severe bound) and `min`
    /// (least severe bound), inclusive.
    #[must_use]
    pub const fn is_within(self, min: Self, max: Self) -> bool {
        max.code() <= self.code() && self.code() <= min.code()
    }
}

impl fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "level_tests.rs"]
mod tests;
