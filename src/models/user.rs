//! User model
//!
//! A username that owns profiles, recommendations and weight logs.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}

impl User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn get_by_username(conn: &Connection, username: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM users WHERE username = ?1")?;

        match stmt.query_row([username], Self::from_row) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by username, creating it if it doesn't exist
    pub fn get_or_create(conn: &Connection, username: &str) -> DbResult<Self> {
        conn.execute(
            "INSERT OR IGNORE INTO users (username) VALUES (?1)",
            [username],
        )?;

        Self::get_by_username(conn, username)?.ok_or(DbError::NotFound("User"))
    }
}
