pub mod assignments;
pub mod connection;
pub mod error;
pub mod models;
pub mod repository;
pub mod work_items;
