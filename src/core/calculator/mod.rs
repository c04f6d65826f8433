pub mod calendar;
pub mod payroll;
pub mod sessions;
