use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::calendar::NonWorkingDays;
use crate::errors::AppResult;
use crate::utils::date::parse_date;
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Holidays { check } = cmd {
        let calendar = cfg.calendar()?;

        match check {
            Some(raw) => {
                let date = parse_date(raw)?;
                let reason = if calendar.is_holiday(date) {
                    "holiday"
                } else if calendar.is_rest_day(date) {
                    "weekly rest day"
                } else {
                    "working day"
                };
                println!(
                    "{date} ({}): {} [{reason}]",
                    date.weekday(),
                    if calendar.is_non_working_day(date) {
                        "non-working"
                    } else {
                        "working"
                    }
                );
            }
            None => {
                println!("Weekly rest day: {}", calendar.rest_day());
                println!("Holidays:");
                for d in calendar.holidays() {
                    println!("  {d} ({})", d.weekday());
                }
            }
        }
    }
    Ok(())
}
