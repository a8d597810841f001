//! Publication periods and the schedule tags stamped onto output rows.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A monthly schedule snapshot, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(ModelError::InvalidPeriod(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Period containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month before this one.
    #[must_use]
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Number of whole months from `self` back to `earlier` (negative when
    /// `earlier` is actually later).
    pub fn months_since(self, earlier: Self) -> i64 {
        (i64::from(self.year) - i64::from(earlier.year)) * 12
            + (i64::from(self.month) - i64::from(earlier.month))
    }

    /// Upper-cased English month name, e.g. `MAY`.
    pub fn month_name(self) -> String {
        month_name(self.month)
    }
}

fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|month| Month::try_from(month).ok())
        .map(|month| month.name().to_uppercase())
        .unwrap_or_default()
}

impl FromStr for Period {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || ModelError::InvalidPeriod(value.to_string());
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str, width: usize| {
            part.len() == width && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !all_digits(year, 4) || !all_digits(month, 2) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Schedule metadata attached to every combination row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTag {
    /// Period identifier, passed through unchanged.
    pub code: String,
    pub year: i32,
    /// Upper-cased month name.
    pub month: String,
}

impl ScheduleTag {
    /// Builds a tag for `code`, using the wall clock when `code` does not parse.
    pub fn from_code(code: &str) -> Self {
        Self::resolve(code, Local::now().date_naive())
    }

    /// Builds a tag for `code`, falling back to `today` for year and month
    /// when `code` is not a valid `YYYY-MM` identifier.
    pub fn resolve(code: &str, today: NaiveDate) -> Self {
        let period = code
            .parse::<Period>()
            .unwrap_or_else(|_| Period::containing(today));
        Self {
            code: code.to_string(),
            year: period.year,
            month: period.month_name(),
        }
    }
}

impl From<Period> for ScheduleTag {
    fn from(period: Period) -> Self {
        Self {
            code: period.to_string(),
            year: period.year,
            month: period.month_name(),
        }
    }
}
