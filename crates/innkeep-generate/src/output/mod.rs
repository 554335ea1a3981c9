pub mod report;
pub mod sql;
