mod common;
use common::{ev, ts};
use qrattend::core::calculator::calendar::HolidayCalendar;
use qrattend::core::calculator::payroll::{
    NegativeDurationPolicy, OvertimeMode, PayrollPolicy, PayrollSummary, aggregate, round2,
};
use qrattend::core::calculator::sessions::WorkSession;
use qrattend::core::report::PayrollReport;
use qrattend::errors::AppError;
use qrattend::models::event_kind::EventKind::{EndLunch, Entry, Exit, StartLunch};

fn session(employee: &str, start: &str, end: &str) -> WorkSession {
    WorkSession {
        employee: employee.into(),
        start: ts(start),
        end: ts(end),
    }
}

fn summary_of(sessions: &[WorkSession], policy: &PayrollPolicy) -> PayrollSummary {
    let map = aggregate(sessions, &HolidayCalendar::default(), policy).expect("aggregate");
    assert_eq!(map.len(), 1);
    *map.values().next().expect("one summary")
}

#[test]
fn test_exactly_eight_hours_is_not_overtime() {
    let s = summary_of(
        &[session("ana", "2024-09-02 09:00", "2024-09-02 17:00")],
        &PayrollPolicy::default(),
    );

    assert_eq!(s.total_hours, 8.0);
    assert_eq!(s.overtime_hours, 0.0);
    assert_eq!(s.holiday_or_sunday_hours, 0.0);
}

#[test]
fn test_nine_and_a_half_hours_gives_one_and_a_half_overtime() {
    let s = summary_of(
        &[session("ana", "2024-09-02 08:00", "2024-09-02 17:30")],
        &PayrollPolicy::default(),
    );

    assert_eq!(s.total_hours, 9.5);
    assert_eq!(s.overtime_hours, 1.5);
}

#[test]
fn test_overtime_is_per_session_by_default() {
    let sessions = [
        session("ana", "2024-09-02 07:00", "2024-09-02 12:00"),
        session("ana", "2024-09-02 13:00", "2024-09-02 18:00"),
    ];

    let s = summary_of(&sessions, &PayrollPolicy::default());
    assert_eq!(s.total_hours, 10.0);
    assert_eq!(s.overtime_hours, 0.0);

    let per_day = PayrollPolicy {
        overtime_mode: OvertimeMode::PerDay,
        ..PayrollPolicy::default()
    };
    let s = summary_of(&sessions, &per_day);
    assert_eq!(s.total_hours, 10.0);
    assert_eq!(s.overtime_hours, 2.0);
}

#[test]
fn test_custom_overtime_threshold() {
    let policy = PayrollPolicy {
        overtime_threshold_hours: 7.5,
        ..PayrollPolicy::default()
    };
    let s = summary_of(&[session("ana", "2024-09-02 09:00", "2024-09-02 17:00")], &policy);

    assert_eq!(s.overtime_hours, 0.5);
}

#[test]
fn test_holiday_session_counts_fully_even_across_midnight() {
    // 2024-12-25 is in the default table; the session ends on the 26th
    let s = summary_of(
        &[session("ana", "2024-12-25 22:00", "2024-12-26 07:00")],
        &PayrollPolicy::default(),
    );

    assert_eq!(s.total_hours, 9.0);
    assert_eq!(s.holiday_or_sunday_hours, 9.0);
    assert_eq!(s.overtime_hours, 1.0);
}

#[test]
fn test_session_ending_on_holiday_is_attributed_by_start_date() {
    let s = summary_of(
        &[session("ana", "2024-12-24 22:00", "2024-12-25 06:00")],
        &PayrollPolicy::default(),
    );

    assert_eq!(s.total_hours, 8.0);
    assert_eq!(s.holiday_or_sunday_hours, 0.0);
}

#[test]
fn test_sunday_hours() {
    let sessions = [
        session("ana", "2024-09-01 10:00", "2024-09-01 14:00"), // Sunday
        session("ana", "2024-09-02 09:00", "2024-09-02 12:00"),
    ];
    let s = summary_of(&sessions, &PayrollPolicy::default());

    assert_eq!(s.total_hours, 7.0);
    assert_eq!(s.holiday_or_sunday_hours, 4.0);
}

#[test]
fn test_fields_are_rounded_independently() {
    // three sessions of 2h40m: the unrounded float sum is not exactly 8
    let sessions = [
        session("ana", "2024-09-02 08:00", "2024-09-02 10:40"),
        session("ana", "2024-09-03 08:00", "2024-09-03 10:40"),
        session("ana", "2024-09-04 08:00", "2024-09-04 10:40"),
    ];
    let s = summary_of(&sessions, &PayrollPolicy::default());
    assert_eq!(s.total_hours, 8.0);

    // 20 minutes → 0.333… → 0.33
    let s = summary_of(
        &[session("ana", "2024-09-02 08:00", "2024-09-02 08:20")],
        &PayrollPolicy::default(),
    );
    assert_eq!(s.total_hours, 0.33);

    assert_eq!(round2(7.9999999), 8.0);
    assert_eq!(round2(1.234), 1.23);
}

#[test]
fn test_negative_session_kept_by_default() {
    let sessions = [
        session("ana", "2024-09-02 09:00", "2024-09-02 17:00"),
        session("ana", "2024-09-03 17:00", "2024-09-03 15:00"),
    ];
    let s = summary_of(&sessions, &PayrollPolicy::default());

    assert_eq!(s.total_hours, 6.0);
    assert_eq!(s.overtime_hours, 0.0);
}

#[test]
fn test_negative_session_skipped() {
    let sessions = [
        session("ana", "2024-09-02 09:00", "2024-09-02 17:00"),
        session("ana", "2024-09-03 17:00", "2024-09-03 15:00"),
    ];
    let policy = PayrollPolicy {
        negative_durations: NegativeDurationPolicy::Skip,
        ..PayrollPolicy::default()
    };
    let s = summary_of(&sessions, &policy);

    assert_eq!(s.total_hours, 8.0);
}

#[test]
fn test_negative_session_rejected() {
    let sessions = [session("ana", "2024-09-03 17:00", "2024-09-03 15:00")];
    let policy = PayrollPolicy {
        negative_durations: NegativeDurationPolicy::Reject,
        ..PayrollPolicy::default()
    };

    let err = aggregate(&sessions, &HolidayCalendar::default(), &policy).unwrap_err();
    assert!(matches!(err, AppError::NegativeSession { ref employee, .. } if employee == "ana"));
}

#[test]
fn test_zero_length_session_is_not_negative() {
    let policy = PayrollPolicy {
        negative_durations: NegativeDurationPolicy::Reject,
        ..PayrollPolicy::default()
    };
    let s = summary_of(&[session("ana", "2024-09-02 09:00", "2024-09-02 09:00")], &policy);

    assert_eq!(s.total_hours, 0.0);
}

#[test]
fn test_report_keeps_employees_independent() {
    let events = vec![
        ev("ana", Entry, "2024-09-02 08:00"),
        ev("luis", Entry, "2024-09-02 09:00"),
        ev("ana", StartLunch, "2024-09-02 12:00"),
        ev("ana", EndLunch, "2024-09-02 13:00"),
        ev("luis", Exit, "2024-09-02 13:00"),
        ev("ana", Exit, "2024-09-02 18:00"),
        ev("luis", Entry, "2024-09-02 14:00"),
    ];

    let report = PayrollReport::from_events(
        events,
        &HolidayCalendar::default(),
        &PayrollPolicy::default(),
    )
    .expect("report");

    assert_eq!(report.summary.len(), 2);
    assert_eq!(report.sessions.len(), 2);

    let ana = report.summary["ana"];
    assert_eq!(ana.total_hours, 10.0);
    assert_eq!(ana.overtime_hours, 2.0);

    let luis = report.summary["luis"];
    assert_eq!(luis.total_hours, 4.0);
    assert_eq!(luis.overtime_hours, 0.0);
    assert_eq!(report.events.len(), 7);
}

#[test]
fn test_employee_without_sessions_gets_zeroed_summary() {
    let events = vec![
        ev("ana", Entry, "2024-09-02 08:00"),
        ev("ana", Exit, "2024-09-02 16:00"),
        ev("luis", Entry, "2024-09-02 09:00"),
        ev("marta", StartLunch, "2024-09-02 12:00"),
    ];
    let report = PayrollReport::from_events(
        events,
        &HolidayCalendar::default(),
        &PayrollPolicy::default(),
    )
    .expect("report");

    let keys: Vec<&str> = report.summary.keys().map(String::as_str).collect();
    assert_eq!(keys, ["ana", "luis", "marta"]);
    assert_eq!(report.summary["ana"].total_hours, 8.0);
    assert_eq!(report.summary["luis"], PayrollSummary::default());
    assert_eq!(report.summary["marta"], PayrollSummary::default());
}

#[test]
fn test_skipped_session_still_lists_employee() {
    let sessions = [session("ana", "2024-09-03 17:00", "2024-09-03 15:00")];
    let policy = PayrollPolicy {
        negative_durations: NegativeDurationPolicy::Skip,
        ..PayrollPolicy::default()
    };
    let events = vec![
        ev("ana", Entry, "2024-09-03 17:00"),
        ev("ana", Exit, "2024-09-03 15:00"),
    ];

    // the aggregator alone only sees sessions
    let totals = aggregate(&sessions, &HolidayCalendar::default(), &policy).expect("aggregate");
    assert!(totals.is_empty());

    // the report covers every employee in the events
    let report =
        PayrollReport::from_events(events, &HolidayCalendar::default(), &policy).expect("report");
    assert_eq!(report.summary["ana"], PayrollSummary::default());
}

#[test]
fn test_exact_halves_round_to_even() {
    // 8h07m30s = 8.125 h exactly, overtime 0.125 h
    let s = summary_of(
        &[session("ana", "2024-09-02 08:00:00", "2024-09-02 16:07:30")],
        &PayrollPolicy::default(),
    );

    assert_eq!(s.total_hours, 8.12);
    assert_eq!(s.overtime_hours, 0.12);
    assert_eq!(round2(0.375), 0.38);
}

#[test]
fn test_empty_input_has_no_summary() {
    let report = PayrollReport::from_events(
        Vec::new(),
        &HolidayCalendar::default(),
        &PayrollPolicy::default(),
    )
    .expect("report");

    assert!(report.summary.is_empty());
    assert!(report.is_empty());
}
