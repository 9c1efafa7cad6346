//! `DD.MM.YY` / `DD.MM.YYYY` date normalization.
//!
//! Two-digit years always expand to `20YY`. Statements are contemporary, so
//! there is no century window.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tenge_core::{DEFAULT_TIMEZONE, today_in};
use tracing::warn;

/// Parses statement dates, substituting today's date for garbage.
#[derive(Debug, Clone, Copy)]
pub struct DateParser {
    tz: Tz,
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl DateParser {
    /// `tz` decides what "today" means for the sentinel.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parse `raw`, or return today's date (with a warning) when it is not a
    /// `DD.MM.YY`/`DD.MM.YYYY` date. Callers that need to tell the two apart
    /// use [`DateParser::try_parse`].
    pub fn parse(&self, raw: &str) -> NaiveDate {
        match self.try_parse(raw) {
            Some(date) => date,
            None => {
                let today = today_in(self.tz);
                warn!(raw, %today, "unparseable date, substituting today");
                today
            }
        }
    }

    /// Strict variant: `None` for anything that is not a valid date.
    pub fn try_parse(&self, raw: &str) -> Option<NaiveDate> {
        parse_dotted(raw)
    }
}

/// Parse `DD.MM.YY` or `DD.MM.YYYY`.
pub fn parse_dotted(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().split('.');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if day.len() != 2 || month.len() != 2 {
        return None;
    }
    if !all_digits(day) || !all_digits(month) || !all_digits(year) {
        return None;
    }

    let year: i32 = match year.len() {
        2 => 2000 + year.parse::<i32>().ok()?,
        4 => year.parse().ok()?,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}
