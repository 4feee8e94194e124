//! # Infrastructure Layer
//!
//! Concrete implementations of the SessionGuard core contracts:
//! - **Database**: MySQL session store using SQLx

pub mod database;

pub use database::connection::connect_pool;
pub use database::mysql::MySqlSessionStore;
