//! Diet recommendation model
//!
//! Archived copies of engine results. Meals and tips are stored as JSON arrays.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::engine::{BmiCategory, RecommendationResult};

/// A stored recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietRecommendation {
    pub id: i64,
    pub user_id: i64,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub tdee: i64,
    pub recommended_calories: i64,
    pub diet_type: String,
    pub diet_plan_title: String,
    pub meals: Vec<String>,
    pub tips: Vec<String>,
    pub created_at: String,
}

fn json_column(row: &Row, name: &str) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(name)?;
    serde_json::from_str(&raw).map_err(|e| {
        let idx = row.as_ref().column_index(name).unwrap_or(0);
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

impl DietRecommendation {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let category: String = row.get("bmi_category")?;

        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            bmi: row.get("bmi")?,
            bmi_category: BmiCategory::from_str(&category).ok_or_else(|| {
                let idx = row.as_ref().column_index("bmi_category").unwrap_or(0);
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    Type::Text,
                    format!("unknown BMI category '{}'", category).into(),
                )
            })?,
            tdee: row.get("tdee")?,
            recommended_calories: row.get("recommended_calories")?,
            diet_type: row.get("diet_type")?,
            diet_plan_title: row.get("diet_plan_title")?,
            meals: json_column(row, "meals")?,
            tips: json_column(row, "tips")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Archive a result for a user
    pub fn create(conn: &Connection, user_id: i64, result: &RecommendationResult) -> DbResult<Self> {
        let meals = serde_json::to_string(result.diet_plan.meals)?;
        let tips = serde_json::to_string(result.diet_plan.tips)?;

        conn.execute(
            r#"
            INSERT INTO diet_recommendations
                (user_id, bmi, bmi_category, tdee, recommended_calories,
                 diet_type, diet_plan_title, meals, tips)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                user_id,
                result.bmi,
                result.category.as_str(),
                result.tdee,
                result.recommended_calories,
                result.diet_type,
                result.diet_plan.title,
                meals,
                tips,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_for_user(conn, id, user_id)?.ok_or(DbError::NotFound("Recommendation"))
    }

    /// Get a recommendation, only if it belongs to the user
    pub fn get_for_user(conn: &Connection, id: i64, user_id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM diet_recommendations WHERE id = ?1 AND user_id = ?2",
        )?;

        match stmt.query_row(params![id, user_id], Self::from_row) {
            Ok(rec) => Ok(Some(rec)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's recommendations, newest first
    pub fn list_by_user(conn: &Connection, user_id: i64, limit: Option<i64>) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM diet_recommendations
            WHERE user_id = ?1
            ORDER BY created_at DESC, id DESC
            LIMIT ?2
            "#,
        )?;
        // LIMIT -1 is unbounded in SQLite
        let recs = stmt
            .query_map(params![user_id, limit.unwrap_or(-1)], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(recs)
    }

    pub fn count_by_user(conn: &Connection, user_id: i64) -> DbResult<i64> {
        let count = conn.query_row(
            "SELECT COUNT(*) FROM diet_recommendations WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn delete(conn: &Connection, id: i64, user_id: i64) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM diet_recommendations WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::engine::{predict, ActivityLevel, Gender, Goal, RecommendationInput};
    use crate::models::User;

    fn result(weight_kg: f64) -> RecommendationResult {
        predict(&RecommendationInput {
            age: 25,
            gender: Gender::Male,
            height_cm: 170.0,
            weight_kg,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Lose,
            diet_type: "nonveg".to_string(),
        })
        .unwrap()
    }

    fn setup() -> (Connection, i64) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let user = User::get_or_create(&conn, "neha").unwrap();
        (conn, user.id)
    }

    #[test]
    fn test_create_keeps_plan_text() {
        let (conn, user_id) = setup();
        let r = result(70.0);
        let stored = DietRecommendation::create(&conn, user_id, &r).unwrap();

        assert_eq!(stored.bmi, r.bmi);
        assert_eq!(stored.bmi_category, BmiCategory::Healthy);
        assert_eq!(stored.tdee, r.tdee);
        assert_eq!(stored.diet_plan_title, "Balanced Non-Vegetarian Diet");
        assert_eq!(stored.meals, r.diet_plan.meals.to_vec());
        assert_eq!(stored.tips, r.diet_plan.tips.to_vec());
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let (conn, user_id) = setup();
        let first = DietRecommendation::create(&conn, user_id, &result(60.0)).unwrap();
        let second = DietRecommendation::create(&conn, user_id, &result(80.0)).unwrap();
        let third = DietRecommendation::create(&conn, user_id, &result(100.0)).unwrap();

        let all = DietRecommendation::list_by_user(&conn, user_id, None).unwrap();
        let ids: Vec<i64> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        let limited = DietRecommendation::list_by_user(&conn, user_id, Some(2)).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(DietRecommendation::count_by_user(&conn, user_id).unwrap(), 3);
    }

    #[test]
    fn test_scoped_to_owner() {
        let (conn, user_id) = setup();
        let other = User::get_or_create(&conn, "vikram").unwrap();
        let rec = DietRecommendation::create(&conn, user_id, &result(70.0)).unwrap();

        assert!(DietRecommendation::get_for_user(&conn, rec.id, other.id).unwrap().is_none());
        assert!(!DietRecommendation::delete(&conn, rec.id, other.id).unwrap());
        assert!(DietRecommendation::delete(&conn, rec.id, user_id).unwrap());
        assert!(DietRecommendation::get_for_user(&conn, rec.id, user_id).unwrap().is_none());
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        let (conn, user_id) = setup();
        let rec = DietRecommendation::create(&conn, user_id, &result(70.0)).unwrap();
        conn.execute(
            "UPDATE diet_recommendations SET bmi_category = 'Athletic' WHERE id = ?1",
            [rec.id],
        )
        .unwrap();

        let err = DietRecommendation::get_for_user(&conn, rec.id, user_id).unwrap_err();
        assert!(err.to_string().contains("Athletic"));
        assert!(DietRecommendation::list_by_user(&conn, user_id, None).is_err());
    }
}
