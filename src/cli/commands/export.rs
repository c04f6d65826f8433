use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportOptions};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        filter,
        summary,
        force,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;
        let opts = ExportOptions {
            format: *format,
            file: file.clone(),
            filter: filter.to_filter()?,
            summary: *summary,
            force: *force,
        };
        ExportLogic::export(&pool.conn, cfg, &opts)?;
    }
    Ok(())
}
