use crate::cli::commands::print_events;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit_best_effort;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_event, recent_events, search_events};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

const RECENT_COUNT: usize = 20;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Logs {
            delete: Some(id), ..
        } => {
            let pool = DbPool::open(&cfg.database)?;
            delete_event(&pool.conn, *id)?;
            audit_best_effort(&pool.conn, "event_del", &id.to_string(), "Deleted event");
            success(format!("Event {id} deleted"));
        }

        Commands::Logs {
            filter,
            limit,
            delete: None,
        } => {
            let mut f = filter.to_filter()?;
            f.newest_first = true;
            f.limit = Some(limit.unwrap_or(cfg.search_limit));

            let pool = DbPool::open(&cfg.database)?;
            let events = search_events(&pool.conn, &f)?;

            if events.is_empty() {
                info("No events found.");
            } else {
                print_events(&events);
            }
        }

        Commands::Recent => {
            let pool = DbPool::open(&cfg.database)?;
            let events = recent_events(&pool.conn, RECENT_COUNT)?;

            if events.is_empty() {
                info("No scans recorded yet.");
            } else {
                print_events(&events);
            }
        }

        _ => {}
    }

    Ok(())
}
