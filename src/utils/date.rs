use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.into()))
}

pub fn parse_opt_date(s: &Option<String>) -> AppResult<Option<NaiveDate>> {
    s.as_deref().map(parse_date).transpose()
}

/// Expand a period shorthand into an inclusive date range:
/// `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or two of those joined by `:`.
pub fn parse_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start, end)) = p.split_once(':') {
        let (s, _) = period_bounds(start.trim())?;
        let (_, e) = period_bounds(end.trim())?;
        return Ok((s, e));
    }
    period_bounds(p.trim())
}

fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(p.to_string());

    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            Ok((d1, month_last_day(d1).ok_or_else(invalid)?))
        }
        10 => {
            let d = parse_date(p)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn month_last_day(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}
