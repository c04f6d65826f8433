pub mod config;
pub mod export;
pub mod holidays;
pub mod init;
pub mod log;
pub mod logs;
pub mod report;
pub mod scan;
pub mod user;

use crate::models::attendance_event::AttendanceEvent;
use crate::utils::table::{Column, Table};

/// Render events as `id  employee  kind  timestamp`.
pub(crate) fn print_events(events: &[AttendanceEvent]) {
    let mut table = Table::new(vec![
        Column::right("id"),
        Column::left("employee"),
        Column::left("kind"),
        Column::left("timestamp"),
    ]);

    for ev in events {
        table.add_row(vec![
            ev.id.to_string(),
            ev.employee.clone(),
            ev.kind.to_string(),
            ev.timestamp_str(),
        ]);
    }

    print!("{}", table.render());
}
