//! Non-working day oracle: weekly rest day plus a configurable holiday table.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// Default holiday table (Colombia, 2024 – early 2025).
/// Replaced or extended through `holidays` / `holidays_file` in the config.
pub const DEFAULT_HOLIDAYS: &[&str] = &[
    "2024-01-01",
    "2024-03-25",
    "2024-03-28",
    "2024-03-29",
    "2024-05-01",
    "2024-05-13",
    "2024-06-03",
    "2024-06-10",
    "2024-07-01",
    "2024-07-20",
    "2024-08-07",
    "2024-08-19",
    "2024-10-14",
    "2024-11-04",
    "2024-11-11",
    "2024-12-08",
    "2024-12-25",
    "2025-01-01",
];

/// Anything that can tell whether a date attracts premium (holiday/Sunday) pay.
pub trait NonWorkingDays {
    fn is_non_working_day(&self, date: NaiveDate) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    rest_day: Weekday,
    holidays: BTreeSet<NaiveDate>,
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::from_date_strings(Weekday::Sun, DEFAULT_HOLIDAYS.iter().copied())
    }
}

impl HolidayCalendar {
    pub fn new(rest_day: Weekday, holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            rest_day,
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Build from `YYYY-MM-DD` strings. Malformed entries are skipped.
    pub fn from_date_strings<I, S>(rest_day: Weekday, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let holidays = dates
            .into_iter()
            .filter_map(|raw| {
                let raw = raw.as_ref();
                match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                    Ok(d) => Some(d),
                    Err(e) => {
                        tracing::warn!(date = raw, error = %e, "ignoring malformed holiday date");
                        None
                    }
                }
            })
            .collect();

        Self { rest_day, holidays }
    }

    pub fn rest_day(&self) -> Weekday {
        self.rest_day
    }

    pub fn holidays(&self) -> impl Iterator<Item = &NaiveDate> {
        self.holidays.iter()
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        date.weekday() == self.rest_day
    }

    /// String entry point. A date that does not parse is a working day.
    pub fn is_non_working_str(&self, date: &str) -> bool {
        NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map(|d| self.is_non_working_day(d))
            .unwrap_or(false)
    }
}

impl NonWorkingDays for HolidayCalendar {
    fn is_non_working_day(&self, date: NaiveDate) -> bool {
        self.is_rest_day(date) || self.is_holiday(date)
    }
}
