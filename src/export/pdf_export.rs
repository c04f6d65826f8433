use crate::core::report::PayrollReport;
use crate::errors::{AppError, AppResult};
use crate::export::model::{EVENT_HEADERS, SUMMARY_HEADERS, events_to_table, summary_to_table};
use crate::export::pdf::{PdfManager, TableSection};
use std::path::Path;

fn headers(h: &[&str]) -> Vec<String> {
    h.iter().map(|s| s.to_string()).collect()
}

/// Payroll summary first, then the raw events it was computed from.
pub(crate) fn export_pdf(report: &PayrollReport, path: &Path, title: &str) -> AppResult<()> {
    let sections = [
        TableSection {
            heading: "Payroll summary".to_string(),
            headers: headers(&SUMMARY_HEADERS),
            rows: summary_to_table(&report.summary),
        },
        TableSection {
            heading: format!("Events ({})", report.events.len()),
            headers: headers(&EVENT_HEADERS),
            rows: events_to_table(&report.events),
        },
    ];

    let mut pdf = PdfManager::new();
    pdf.write_sections(title, &sections);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;
    Ok(())
}
