//! Generation timestamps embedded in artifact headers.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};

/// Format shared by every generated header, e.g. `2025-01-02 03:04:05 +02:00`.
///
/// The offset is numeric: chrono has no zone abbreviation for local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

/// Preformatted moment an artifact was generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wraps an already formatted timestamp.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Current local time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Formats a point in time with [`TIMESTAMP_FORMAT`].
    #[must_use]
    pub fn from_datetime<Tz>(moment: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self(moment.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Returns the formatted text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
