//! Console feedback for the operator (icons + ANSI colour on a terminal).

use std::fmt;
use std::io::IsTerminal;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn styled(color: &str, icon: &str, msg: &dyn fmt::Display, tty: bool) -> String {
    if tty {
        format!("{color}{BOLD}{icon}{RESET} {msg}")
    } else {
        format!("{icon} {msg}")
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", styled(FG_BLUE, ICON_INFO, &msg, std::io::stdout().is_terminal()));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", styled(FG_GREEN, ICON_OK, &msg, std::io::stdout().is_terminal()));
}

/// Warnings go to stderr so that machine-readable stdout stays clean.
pub fn warning<T: fmt::Display>(msg: T) {
    eprintln!("{}", styled(FG_YELLOW, ICON_WARN, &msg, std::io::stderr().is_terminal()));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", styled(FG_RED, ICON_ERR, &msg, std::io::stderr().is_terminal()));
}
