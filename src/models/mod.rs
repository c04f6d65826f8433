pub mod attendance_event;
pub mod event_kind;
pub mod user;
