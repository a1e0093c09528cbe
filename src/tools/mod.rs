//! Diet tools
//!
//! Tool implementations behind the MCP server.

pub mod profiles;
pub mod recommend;
pub mod status;
pub mod weight_logs;

use rusqlite::Connection;
use serde::Serialize;

use crate::models::User;

/// Response for delete operations
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted_id: i64,
}

fn normalize_username(username: &str) -> Result<&str, String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err("Username must not be empty".to_string());
    }
    Ok(trimmed)
}

/// Look up an existing user; `None` if the username was never used
pub(crate) fn find_user(conn: &Connection, username: &str) -> Result<Option<User>, String> {
    let username = normalize_username(username)?;
    User::get_by_username(conn, username).map_err(|e| format!("Failed to look up user: {}", e))
}

/// Look up a user, creating it on first write
pub(crate) fn ensure_user(conn: &Connection, username: &str) -> Result<User, String> {
    let username = normalize_username(username)?;
    User::get_or_create(conn, username).map_err(|e| format!("Failed to create user: {}", e))
}
