pub mod principal;
pub mod schedule;
