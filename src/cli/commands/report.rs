use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::{PayrollReport, ReportLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::{hours2, hours2readable};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { filter, json } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let report = ReportLogic::build(&pool.conn, &filter.to_filter()?, cfg)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&report.summary)?);
        } else if report.is_empty() {
            info("No events found for the selected filters.");
        } else {
            print!("{}", render_summary(&report));
        }
    }
    Ok(())
}

fn render_summary(report: &PayrollReport) -> String {
    let mut table = Table::new(vec![
        Column::left("employee"),
        Column::right("sessions"),
        Column::right("total h"),
        Column::right("holiday/Sunday h"),
        Column::right("overtime h"),
        Column::right("worked"),
    ]);

    for (employee, s) in &report.summary {
        let sessions = report
            .sessions
            .iter()
            .filter(|w| &w.employee == employee)
            .count();

        table.add_row(vec![
            employee.clone(),
            sessions.to_string(),
            hours2(s.total_hours),
            hours2(s.holiday_or_sunday_hours),
            hours2(s.overtime_hours),
            hours2readable(s.total_hours),
        ]);
    }

    table.render()
}
