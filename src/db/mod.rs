//! Database module
//!
//! Handles SQLite connection and schema setup.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
