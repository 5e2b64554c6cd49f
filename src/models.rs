pub mod dashboard;
pub mod time_range;
