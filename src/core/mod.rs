pub mod calculator;
pub mod log;
pub mod report;
pub mod scan;
