use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::scan::{Badge, ScanLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::attendance_event::parse_timestamp;
use crate::models::event_kind::EventKind;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan { kind, qr, user, at } = cmd {
        let kind = EventKind::parse(kind)?;

        let badge = match (qr, user) {
            (Some(q), _) => Badge::Qr(q.clone()),
            (None, Some(u)) => Badge::Username(u.clone()),
            (None, None) => return Err(AppError::Other("pass --qr or --user".into())),
        };

        let at = at.as_deref().map(parse_timestamp).transpose()?;

        let pool = DbPool::open(&cfg.database)?;
        let event = ScanLogic::record(&pool.conn, &badge, kind, at)?;

        success(format!(
            "Recorded: {} - {} at {}",
            event.employee,
            event.kind,
            event.timestamp_str()
        ));
    }
    Ok(())
}
