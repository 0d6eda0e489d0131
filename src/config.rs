//! Export configuration.
//!
//! Configuration is an explicit value threaded into the pipeline rather than
//! process-wide state. The only knob the core pipeline consumes is the
//! target timezone; output naming belongs to the CLI front-end.
//!
//! # Example
//!
//! ```rust
//! use slackhist::config::{ExportConfig, Timezone};
//!
//! let config = ExportConfig::new()
//!     .with_timezone("UTC".parse::<Timezone>().unwrap());
//! ```

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::SlackhistError;

/// The timezone messages are rendered in.
///
/// Parsed from the CLI `--timezone` flag: `local` (case-insensitive) selects
/// the host zone, anything else must be a valid IANA zone name such as
/// `UTC`, `Europe/Berlin` or `America/New_York`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timezone {
    /// The host's local timezone (the default).
    Local,

    /// A named IANA timezone.
    Named(Tz),
}

impl Timezone {
    /// Converts a UTC instant into this timezone.
    ///
    /// The result carries a fixed offset so messages from both `Local` and
    /// named zones share one representation downstream.
    pub fn localize(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => Local.from_utc_datetime(&utc.naive_utc()).fixed_offset(),
            Timezone::Named(tz) => utc.with_timezone(tz).fixed_offset(),
        }
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Timezone::Local
    }
}

impl FromStr for Timezone {
    type Err = SlackhistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        s.parse::<Tz>()
            .map(Timezone::Named)
            .map_err(|_| SlackhistError::unknown_timezone(s))
    }
}

impl std::fmt::Display for Timezone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timezone::Local => write!(f, "local"),
            Timezone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

/// Configuration for one export run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportConfig {
    /// Timezone messages are rendered in.
    pub timezone: Timezone,
}

impl ExportConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target timezone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }
}
