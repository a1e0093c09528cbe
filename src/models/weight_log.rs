//! Weight log model
//!
//! Body weight recorded over time.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

pub const MIN_LOG_WEIGHT_KG: f64 = 30.0;
pub const MAX_LOG_WEIGHT_KG: f64 = 200.0;

/// A weight measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLog {
    pub id: i64,
    pub user_id: i64,
    pub weight: f64,  // kg
    pub date: String, // ISO date: "2025-01-09"
    pub notes: Option<String>,
    pub created_at: String,
}

/// Data for logging a weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLogCreate {
    pub weight: f64,
    /// Defaults to today (UTC)
    pub date: Option<String>,
    pub notes: Option<String>,
}

impl WeightLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            weight: row.get("weight")?,
            date: row.get("date")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(conn: &Connection, user_id: i64, data: &WeightLogCreate) -> DbResult<Self> {
        let date = data
            .date
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());

        conn.execute(
            "INSERT INTO weight_logs (user_id, weight, date, notes) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, data.weight, date, data.notes],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_for_user(conn, id, user_id)?.ok_or(DbError::NotFound("Weight log"))
    }

    pub fn get_for_user(conn: &Connection, id: i64, user_id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM weight_logs WHERE id = ?1 AND user_id = ?2")?;

        match stmt.query_row(params![id, user_id], Self::from_row) {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's weight logs, newest date first
    pub fn list_by_user(conn: &Connection, user_id: i64, limit: Option<i64>) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM weight_logs WHERE user_id = ?1 ORDER BY date DESC, id DESC LIMIT ?2",
        )?;
        let logs = stmt
            .query_map(params![user_id, limit.unwrap_or(-1)], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(logs)
    }

    pub fn delete(conn: &Connection, id: i64, user_id: i64) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM weight_logs WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }
}
