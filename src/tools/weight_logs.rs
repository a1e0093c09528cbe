//! Weight Log Tools
//!
//! Record body weight over time and review the trend.

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::Database;
use crate::engine::round_one_decimal;
use crate::models::{WeightLog, WeightLogCreate, MAX_LOG_WEIGHT_KG, MIN_LOG_WEIGHT_KG};

use super::{ensure_user, find_user, DeleteResponse};

/// Weight log entry for listing
#[derive(Debug, Serialize)]
pub struct WeightLogSummary {
    pub id: i64,
    pub weight: f64,
    pub date: String,
    pub notes: Option<String>,
}

impl From<&WeightLog> for WeightLogSummary {
    fn from(log: &WeightLog) -> Self {
        Self {
            id: log.id,
            weight: log.weight,
            date: log.date.clone(),
            notes: log.notes.clone(),
        }
    }
}

/// Response for list_weight_logs
#[derive(Debug, Serialize)]
pub struct ListWeightLogsResponse {
    pub username: String,
    pub logs: Vec<WeightLogSummary>,
    pub total: usize,
    /// Newest minus oldest weight among the returned logs, in kg
    pub change_kg: Option<f64>,
}

fn validate_weight(weight: f64) -> Result<(), String> {
    if !weight.is_finite() || !(MIN_LOG_WEIGHT_KG..=MAX_LOG_WEIGHT_KG).contains(&weight) {
        return Err(format!(
            "Weight must be between {} and {} kg (got {})",
            MIN_LOG_WEIGHT_KG, MAX_LOG_WEIGHT_KG, weight
        ));
    }
    Ok(())
}

/// Parse a caller date; stored dates are always zero-padded so text order is date order
fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", date))
}

/// Log a weight for a user
pub fn add_weight_log(
    db: &Database,
    username: &str,
    weight: f64,
    date: Option<&str>,
    notes: Option<&str>,
) -> Result<WeightLogSummary, String> {
    validate_weight(weight)?;
    let date = date.map(parse_date).transpose()?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let user = ensure_user(&conn, username)?;

    let data = WeightLogCreate {
        weight,
        date: date.map(|d| d.format("%Y-%m-%d").to_string()),
        notes: notes.map(String::from),
    };
    let log = WeightLog::create(&conn, user.id, &data)
        .map_err(|e| format!("Failed to add weight log: {}", e))?;

    tracing::info!(username = %user.username, weight, date = %log.date, "weight logged");
    Ok(WeightLogSummary::from(&log))
}

/// List a user's weight logs, newest first
pub fn list_weight_logs(
    db: &Database,
    username: &str,
    limit: Option<i64>,
) -> Result<ListWeightLogsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let Some(user) = find_user(&conn, username)? else {
        return Ok(ListWeightLogsResponse {
            username: username.trim().to_string(),
            logs: Vec::new(),
            total: 0,
            change_kg: None,
        });
    };

    let logs = WeightLog::list_by_user(&conn, user.id, limit)
        .map_err(|e| format!("Failed to list weight logs: {}", e))?;

    let change_kg = match (logs.first(), logs.last()) {
        (Some(newest), Some(oldest)) if logs.len() > 1 => {
            Some(round_one_decimal(newest.weight - oldest.weight))
        }
        _ => None,
    };

    let summaries: Vec<WeightLogSummary> = logs.iter().map(WeightLogSummary::from).collect();
    let total = summaries.len();
    Ok(ListWeightLogsResponse {
        username: user.username,
        logs: summaries,
        total,
        change_kg,
    })
}

pub fn delete_weight_log(db: &Database, username: &str, id: i64) -> Result<DeleteResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let success = match find_user(&conn, username)? {
        Some(user) => WeightLog::delete(&conn, id, user.id)
            .map_err(|e| format!("Failed to delete weight log: {}", e))?,
        None => false,
    };

    Ok(DeleteResponse {
        success,
        deleted_id: id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_bounds() {
        let db = Database::in_memory().unwrap();
        assert!(add_weight_log(&db, "ian", 29.9, None, None).is_err());
        assert!(add_weight_log(&db, "ian", 200.1, None, None).is_err());
        assert!(add_weight_log(&db, "ian", f64::NAN, None, None).is_err());
        assert!(add_weight_log(&db, "ian", 30.0, None, None).is_ok());
        assert!(add_weight_log(&db, "ian", 200.0, None, None).is_ok());
    }

    #[test]
    fn test_rejects_bad_date() {
        let db = Database::in_memory().unwrap();
        let err = add_weight_log(&db, "ian", 70.0, Some("15/03/2025"), None).unwrap_err();
        assert!(err.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_dates_are_stored_padded() {
        let db = Database::in_memory().unwrap();
        let march = add_weight_log(&db, "noor", 80.0, Some("2025-3-1"), None).unwrap();
        assert_eq!(march.date, "2025-03-01");
        add_weight_log(&db, "noor", 70.0, Some(" 2025-12-01"), None).unwrap();

        let listed = list_weight_logs(&db, "noor", None).unwrap();
        assert_eq!(listed.logs[0].date, "2025-12-01");
        assert_eq!(listed.logs[1].date, "2025-03-01");
        assert_eq!(listed.change_kg, Some(-10.0));
    }

    #[test]
    fn test_list_reports_change() {
        let db = Database::in_memory().unwrap();
        add_weight_log(&db, "zoya", 74.0, Some("2025-01-01"), Some("start")).unwrap();
        add_weight_log(&db, "zoya", 72.6, Some("2025-02-01"), None).unwrap();
        add_weight_log(&db, "zoya", 71.3, Some("2025-03-01"), None).unwrap();

        let listed = list_weight_logs(&db, "zoya", None).unwrap();
        assert_eq!(listed.total, 3);
        assert_eq!(listed.logs[0].date, "2025-03-01");
        assert_eq!(listed.logs[2].notes.as_deref(), Some("start"));
        assert_eq!(listed.change_kg, Some(-2.7));

        let single = list_weight_logs(&db, "zoya", Some(1)).unwrap();
        assert_eq!(single.change_kg, None);
    }

    #[test]
    fn test_delete_weight_log() {
        let db = Database::in_memory().unwrap();
        let log = add_weight_log(&db, "zoya", 70.0, None, None).unwrap();
        assert!(!delete_weight_log(&db, "other", log.id).unwrap().success);
        assert!(delete_weight_log(&db, "zoya", log.id).unwrap().success);
        assert_eq!(list_weight_logs(&db, "zoya", None).unwrap().total, 0);
    }
}
