//! Rolling seven-day reporting window.
//!
//! Every report request derives a fresh [`Cutoff`] from the current date.
//! The cutoff is computed once per request and handed to each query so the
//! commit, pull request and issue counts all share the same window.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, Utc};
use std::fmt;

/// Length of the reporting window in days.
pub const WINDOW_DAYS: u64 = 7;

/// Start of the reporting window: the current date minus [`WINDOW_DAYS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoff {
    date: NaiveDate,
}

impl Cutoff {
    /// Computes the cutoff from the local wall-clock date.
    #[must_use]
    pub fn now() -> Self {
        Self::from_today(Local::now().date_naive())
    }

    /// Computes the cutoff relative to the given date.
    #[must_use]
    pub fn from_today(today: NaiveDate) -> Self {
        let date = today
            .checked_sub_days(Days::new(WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);
        Self { date }
    }

    /// Returns the first day inside the window.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the cutoff as an ISO-8601 date (`YYYY-MM-DD`).
    #[must_use]
    pub fn as_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Returns midnight UTC of the cutoff date.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }

    /// Returns true if the timestamp falls on or after the cutoff date.
    #[must_use]
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        *timestamp >= self.start()
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_iso())
    }
}
