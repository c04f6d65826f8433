#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use qrattend::models::attendance_event::{AttendanceEvent, parse_timestamp};
use qrattend::models::event_kind::EventKind;
use std::path::Path;
use tempfile::TempDir;

/// A throwaway HOME with its own database, so no real config is picked up.
pub struct Sandbox {
    pub dir: TempDir,
    pub db: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = dir
            .path()
            .join("qrattend_test.sqlite")
            .to_string_lossy()
            .to_string();
        Self { dir, db }
    }

    /// `qrattend --db <sandbox db> ...` with HOME pointing at the sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("qrattend");
        cmd.env("HOME", self.dir.path())
            .env_remove("RUST_LOG")
            .args(["--db", &self.db]);
        cmd
    }

    pub fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().to_string()
    }

    pub fn init(&self) {
        self.cmd().args(["--test", "init"]).assert().success();
    }

    pub fn add_user(&self, name: &str) {
        self.cmd().args(["user", "add", name]).assert().success();
    }

    pub fn scan(&self, kind: &str, user: &str, at: &str) {
        self.cmd()
            .args(["scan", kind, "--user", user, "--at", at])
            .assert()
            .success();
    }
}

pub fn ts(s: &str) -> NaiveDateTime {
    parse_timestamp(s).expect("valid timestamp")
}

pub fn ev(employee: &str, kind: EventKind, at: &str) -> AttendanceEvent {
    AttendanceEvent::new(0, employee, kind, ts(at)).expect("valid event")
}

pub fn read(path: &str) -> String {
    assert!(Path::new(path).exists(), "missing output file {path}");
    std::fs::read_to_string(path).expect("read output file")
}
