//! Calendar month windows (`YYYY-MM`, UTC)

use crate::error::{AppError, AppResult};
use chrono::{NaiveDate, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// A calendar month, used as the half-open interval
/// `[first instant of month, first instant of next month)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> AppResult<Self> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(AppError::invalid_month(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// Parse strictly `YYYY-MM`
    pub fn parse(raw: &str) -> AppResult<Self> {
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(AppError::invalid_month(raw));
        }

        let year = raw[..4].parse().map_err(|_| AppError::invalid_month(raw))?;
        let month = raw[5..].parse().map_err(|_| AppError::invalid_month(raw))?;
        Self::new(year, month).map_err(|_| AppError::invalid_month(raw))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First instant of the month (Unix millis, inclusive)
    pub fn start_millis(&self) -> i64 {
        first_instant_millis(self.year, self.month)
    }

    /// First instant of the next month (Unix millis, exclusive)
    pub fn end_millis(&self) -> i64 {
        let next = self.next();
        first_instant_millis(next.year, next.month)
    }

    /// Whether a timestamp falls inside the month window
    pub fn contains(&self, millis: i64) -> bool {
        (self.start_millis()..self.end_millis()).contains(&millis)
    }
}

fn first_instant_millis(year: i32, month: u32) -> i64 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt).timestamp_millis())
        .unwrap_or_default()
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
