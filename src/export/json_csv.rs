use crate::core::report::PayrollReport;
use crate::errors::AppResult;
use crate::export::model::{EventRow, summary_rows};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// `{ "summary": {...}, "events": [...] }`, pretty-printed.
pub(crate) fn export_json(report: &PayrollReport, path: &Path) -> AppResult<()> {
    let json = serde_json::to_string_pretty(report)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Raw events, one row each (header from serde).
pub(crate) fn export_events_csv(report: &PayrollReport, path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for ev in &report.events {
        wtr.serialize(EventRow::from(ev))?;
    }
    wtr.flush()?;
    Ok(())
}

/// One payroll row per employee.
pub(crate) fn export_summary_csv(report: &PayrollReport, path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in summary_rows(&report.summary) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
