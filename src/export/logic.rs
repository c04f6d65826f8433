use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::log::audit_best_effort;
use crate::db::queries::EventFilter;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_events_csv, export_json, export_summary_csv};
use crate::export::notify_export_success;
use crate::export::pdf_export::export_pdf;
use crate::ui::messages::{info, warning};
use rusqlite::Connection;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Absolute path of the output file.
    pub file: String,
    pub filter: EventFilter,
    /// CSV only: write per-employee payroll rows instead of raw events.
    pub summary: bool,
    pub force: bool,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export the events matching the filter together with their payroll totals.
    ///
    /// Returns `Ok(false)` when nothing matched and no file was written.
    pub fn export(conn: &Connection, cfg: &Config, opts: &ExportOptions) -> AppResult<bool> {
        let path = Path::new(&opts.file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {}",
                opts.file
            )));
        }

        let mut filter = opts.filter.clone();
        filter.newest_first = true;
        filter.limit = None;

        let report = ReportLogic::build(conn, &filter, cfg)?;

        if report.is_empty() {
            warning("No events found for the selected filters.");
            return Ok(false);
        }

        ensure_writable(path, opts.force)?;

        info(format!(
            "Exporting {} events / {} employees to {}: {}",
            report.events.len(),
            report.summary.len(),
            opts.format.as_str().to_uppercase(),
            path.display()
        ));

        match opts.format {
            ExportFormat::Csv if opts.summary => export_summary_csv(&report, path)?,
            ExportFormat::Csv => export_events_csv(&report, path)?,
            ExportFormat::Json => export_json(&report, path)?,
            ExportFormat::Pdf => export_pdf(&report, path, &build_title(&filter))?,
        }

        notify_export_success(&opts.format.as_str().to_uppercase(), path);
        audit_best_effort(
            conn,
            "export",
            opts.format.as_str(),
            &format!("{} events to {}", report.events.len(), path.display()),
        );

        Ok(true)
    }
}

/// PDF title from the date bounds of the filter.
pub(crate) fn build_title(filter: &EventFilter) -> String {
    let base = "Attendance and payroll report";

    match (filter.from, filter.to) {
        (Some(f), Some(t)) if f == t => format!("{base} for {f}"),
        (Some(f), Some(t)) => format!("{base} from {f} to {t}"),
        (Some(f), None) => format!("{base} since {f}"),
        (None, Some(t)) => format!("{base} until {t}"),
        (None, None) => base.to_string(),
    }
}
