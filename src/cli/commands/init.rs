use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::audit_best_effort;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// Creates the config directory and file (skipped in test mode), the
/// SQLite database and its schema.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing qrattend…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", cfg.database);

    let pool = DbPool::open(&cfg.database)?;

    audit_best_effort(
        &pool.conn,
        "init",
        "",
        &format!("Database initialized at {}", cfg.database),
    );

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
