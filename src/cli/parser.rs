use crate::db::queries::EventFilter;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::models::event_kind::EventKind;
use crate::utils::date::{parse_opt_date, parse_period};
use clap::{Args, Parser, Subcommand};

/// Admin console for the QR attendance tracker
#[derive(Parser)]
#[command(
    name = "qrattend",
    version = env!("CARGO_PKG_VERSION"),
    about = "QR attendance tracker: record scans, review logs and export payroll reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Enable debug diagnostics on stderr (otherwise RUST_LOG applies)
    #[arg(global = true, long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Event filters shared by `logs`, `report` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Username substring
    #[arg(long = "user", value_name = "NAME")]
    pub user: Option<String>,

    /// Event kind (entry, exit, start_lunch, end_lunch)
    #[arg(long = "kind")]
    pub kind: Option<String>,

    /// First date included (YYYY-MM-DD)
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<String>,

    /// Last date included (YYYY-MM-DD)
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<String>,

    /// Shorthand for --from/--to: YYYY, YYYY-MM, YYYY-MM-DD or START:END
    #[arg(long, short = 'p', conflicts_with_all = ["from", "to"])]
    pub period: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> AppResult<EventFilter> {
        let (from, to) = match &self.period {
            Some(p) => {
                let (f, t) = parse_period(p)?;
                (Some(f), Some(t))
            }
            None => (parse_opt_date(&self.from)?, parse_opt_date(&self.to)?),
        };

        Ok(EventFilter {
            employee: self.user.clone(),
            kind: self.kind.as_deref().map(EventKind::parse).transpose()?,
            from,
            to,
            limit: None,
            newest_first: false,
        })
    }
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a user and print their QR payload
    Add {
        username: String,

        #[arg(long, default_value = "employee", help = "admin, employee or supervisor")]
        role: String,

        #[arg(long, help = "National ID number")]
        cedula: Option<String>,

        #[arg(long)]
        area: Option<String>,
    },

    /// List registered users
    List,

    /// Update a user's fields (an empty value clears cedula/area)
    Update {
        id: i64,

        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        role: Option<String>,

        #[arg(long)]
        cedula: Option<String>,

        #[arg(long)]
        area: Option<String>,
    },

    /// Delete a user together with their events
    Del { id: i64 },

    /// Print the QR payload of a user
    Qr { username: String },
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "edit", help = "Edit the configuration file ($EDITOR, or nano/notepad)")]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use instead of $EDITOR")]
        editor: Option<String>,
    },

    /// Manage employees
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Record a scan (entry, exit, start_lunch, end_lunch)
    Scan {
        kind: String,

        #[arg(long = "qr", conflicts_with = "user", required_unless_present = "user")]
        qr: Option<String>,

        #[arg(long = "user")]
        user: Option<String>,

        #[arg(long = "at", help = "Timestamp YYYY-MM-DD HH:MM[:SS] (default: now)")]
        at: Option<String>,
    },

    /// Search the event log (newest first)
    Logs {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, help = "Maximum rows shown (default from config)")]
        limit: Option<usize>,

        #[arg(long = "delete", value_name = "ID", help = "Delete one event by id")]
        delete: Option<i64>,
    },

    /// Show the 20 most recent scans
    Recent,

    /// Print payroll totals per employee
    Report {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Export events and payroll totals
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, short = 's', help = "CSV: write payroll rows instead of events")]
        summary: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List configured holidays or check one date
    Holidays {
        #[arg(long, value_name = "DATE")]
        check: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
