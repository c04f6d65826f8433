use crate::db::log::{AuditEntry, load_audit};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("ANSI regex is valid"));

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Colour of an audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "scan" => Colour::Green,
        "user_add" => Colour::Cyan,
        "user_update" => Colour::Yellow,
        "user_del" | "event_del" => Colour::Red,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

const OP_WIDTH_MAX: usize = 40;
const MESSAGE_WIDTH: usize = 70;

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_audit(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| op_target(e).width())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_MAX);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for entry in &entries {
            println!("{}", render_line(entry, id_w, date_w, op_w));
        }

        Ok(())
    }
}

fn op_target(e: &AuditEntry) -> String {
    if e.target.is_empty() {
        e.operation.clone()
    } else {
        format!("{} ({})", e.operation, e.target)
    }
}

fn render_line(entry: &AuditEntry, id_w: usize, date_w: usize, op_w: usize) -> String {
    let date = chrono::DateTime::parse_from_rfc3339(&entry.date)
        .map(|dt| dt.format("%F %T").to_string())
        .unwrap_or_else(|_| entry.date.clone());

    let mut visible = op_target(entry);
    if visible.width() > op_w {
        visible = visible.chars().take(op_w.saturating_sub(3)).collect::<String>() + "...";
    }

    // only the operation word is coloured
    let color = color_for_operation(&entry.operation);
    let colored = match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    };
    let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).width()));

    let prefix = format!(
        "{:>id_w$}: {:<date_w$} | {}{} => ",
        entry.id, date, colored, padding
    );
    let indent = " ".repeat(strip_ansi(&prefix).width());

    let wrapped = textwrap::wrap(&entry.message, MESSAGE_WIDTH);
    let mut out = prefix;
    for (i, line) in wrapped.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}
