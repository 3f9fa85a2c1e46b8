//! Calendar clock — "today" for the visibility policy.
//!
//! Testers can simulate any date with a `debug_date` parameter. The override
//! is parsed into a real date up front; anything unparseable falls back to the
//! real local date instead of leaking an invalid value into the policy.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{AdventError, Result};

/// The date the calendar believes it is. Months are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    date: NaiveDate,
}

impl Clock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// The browser's local date.
    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Resolve the clock from an optional debug override, falling back to
    /// `fallback` when the override is absent or unparseable.
    pub fn resolve(debug: Option<&str>, fallback: NaiveDate) -> Self {
        match debug.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::new(fallback),
            Some(input) => Self::parse_debug(input).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring debug date override");
                Self::new(fallback)
            }),
        }
    }

    /// Like [`Clock::resolve`], using the real date as fallback.
    pub fn from_debug_param(debug: Option<&str>) -> Self {
        Self::resolve(debug, Self::now().date)
    }

    /// Parse a debug override. Accepts `YYYY-MM-DD`, RFC 3339 date-times and
    /// `YYYY-MM-DDTHH:MM[:SS]` local date-times. An RFC 3339 instant counts
    /// on the browser's local day, like the real clock would.
    pub fn parse_debug(input: &str) -> Result<Self> {
        Self::parse_debug_in(input, &Local)
    }

    /// [`Clock::parse_debug`] with instants converted into `tz`.
    pub fn parse_debug_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<Self> {
        let input = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Ok(Self::new(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Ok(Self::new(dt.with_timezone(tz).date_naive()));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
                return Ok(Self::new(dt.date()));
            }
        }
        Err(AdventError::InvalidDebugDate {
            input: input.to_string(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Month of year, 1 = January.
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Day of month, 1-based.
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}
