mod schedule;
mod server;

pub use schedule::{assign_dates, bulk_dates, list_assignments, query_compliance, remove_dates};
pub use server::server_health;
