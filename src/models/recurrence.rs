//! Recurrence descriptors for spending categories
//!
//! Categories carry a human-readable `date` string. The recognised forms are:
//!
//! - `Weekly on <Day>` (e.g. "Weekly on Friday")
//! - `Monthly on <N>` (e.g. "Monthly on 15")
//! - `<Mon> <N>` (e.g. "Dec 24"), a day of the year
//! - `<DD>/<MM>/<YYYY>` (e.g. "24/12/2025"), a single date

use chrono::{Datelike, Duration, Month, NaiveDate, Weekday};
use std::fmt;
use std::str::FromStr;

use crate::error::{PocketError, PocketResult};

/// Parsed form of a category's `date` descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    Weekly(Weekday),
    Monthly { day: u32 },
    DayOfYear { month: u32, day: u32 },
    Once(NaiveDate),
}

/// Number of days in the given month (1-based)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Build a date, clamping `day` to the month's last day
fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
}

impl Recurrence {
    pub fn parse(descriptor: &str) -> PocketResult<Self> {
        let s = descriptor.trim();
        let invalid = || {
            PocketError::Validation(format!("Unrecognised recurrence descriptor: '{}'", s))
        };

        if let Some(day) = s.strip_prefix("Weekly on ") {
            let weekday = Weekday::from_str(day.trim()).map_err(|_| invalid())?;
            return Ok(Self::Weekly(weekday));
        }

        if let Some(day) = s.strip_prefix("Monthly on ") {
            let day: u32 = day.trim().parse().map_err(|_| invalid())?;
            if !(1..=31).contains(&day) {
                return Err(invalid());
            }
            return Ok(Self::Monthly { day });
        }

        if s.contains('/') {
            let date = NaiveDate::parse_from_str(s, "%d/%m/%Y").map_err(|_| invalid())?;
            return Ok(Self::Once(date));
        }

        let (month, day) = s.split_once(' ').ok_or_else(invalid)?;
        let month = Month::from_str(month).map_err(|_| invalid())?.number_from_month();
        let day: u32 = day.trim().parse().map_err(|_| invalid())?;
        // 2024 is a leap year, so Feb 29 is accepted here
        if NaiveDate::from_ymd_opt(2024, month, day).is_none() {
            return Err(invalid());
        }
        Ok(Self::DayOfYear { month, day })
    }

    pub fn is_repeating(&self) -> bool {
        matches!(self, Self::Weekly(_) | Self::Monthly { .. })
    }

    /// First due date on or after `from`; `None` once a one-off date has passed
    pub fn next_due(&self, from: NaiveDate) -> Option<NaiveDate> {
        match *self {
            Self::Weekly(weekday) => {
                let ahead = (7 + weekday.num_days_from_monday() as i64
                    - from.weekday().num_days_from_monday() as i64)
                    % 7;
                Some(from + Duration::days(ahead))
            }
            Self::Monthly { day } => {
                let this_month = clamped_date(from.year(), from.month(), day)?;
                if this_month >= from {
                    return Some(this_month);
                }
                let (year, month) = if from.month() == 12 {
                    (from.year() + 1, 1)
                } else {
                    (from.year(), from.month() + 1)
                };
                clamped_date(year, month, day)
            }
            Self::DayOfYear { month, day } => {
                let this_year = clamped_date(from.year(), month, day)?;
                if this_year >= from {
                    return Some(this_year);
                }
                clamped_date(from.year() + 1, month, day)
            }
            Self::Once(date) => (date >= from).then_some(date),
        }
    }

    /// Descriptor for a one-off date in the "<Mon> <N>" form
    pub fn day_of_year_descriptor(date: NaiveDate) -> String {
        date.format("%b %-d").to_string()
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly(weekday) => {
                let name = match weekday {
                    Weekday::Mon => "Monday",
                    Weekday::Tue => "Tuesday",
                    Weekday::Wed => "Wednesday",
                    Weekday::Thu => "Thursday",
                    Weekday::Fri => "Friday",
                    Weekday::Sat => "Saturday",
                    Weekday::Sun => "Sunday",
                };
                write!(f, "Weekly on {}", name)
            }
            Self::Monthly { day } => write!(f, "Monthly on {}", day),
            Self::DayOfYear { month, day } => {
                let name = Month::try_from(*month as u8)
                    .map(|m| m.name())
                    .unwrap_or("???");
                write!(f, "{} {}", &name[..3], day)
            }
            Self::Once(date) => write!(f, "{}", date.format("%d/%m/%Y")),
        }
    }
}
