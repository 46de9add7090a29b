pub mod assignment;
pub mod bulk;
pub mod compliance;
pub mod health;
pub mod shared;
