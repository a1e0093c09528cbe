//! User profile model
//!
//! Stored body metrics and preferences, one row per user.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::engine::{ActivityLevel, DietType, EngineError, Gender, Goal, RecommendationInput};

/// Health profile of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub user_id: i64,
    pub age: u32,
    pub gender: Gender,
    pub height: f64,  // cm
    pub weight: f64,  // kg
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub diet_type: DietType,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating or replacing a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileData {
    pub age: u32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub diet_type: DietType,
}

impl ProfileData {
    /// Same range checks the engine applies
    pub fn validate(&self) -> Result<(), EngineError> {
        RecommendationInput {
            age: self.age,
            gender: self.gender,
            height_cm: self.height,
            weight_kg: self.weight,
            activity_level: self.activity_level,
            goal: self.goal,
            diet_type: self.diet_type.as_str().to_string(),
        }
        .validate()
    }
}

impl UserProfile {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let gender: String = row.get("gender")?;
        let activity_level: String = row.get("activity_level")?;
        let goal: String = row.get("goal")?;
        let diet_type: String = row.get("diet_type")?;

        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            age: row.get("age")?,
            gender: Gender::from_str_lossy(&gender),
            height: row.get("height")?,
            weight: row.get("weight")?,
            activity_level: ActivityLevel::from_str(&activity_level)
                .unwrap_or(ActivityLevel::Sedentary),
            goal: Goal::from_str(&goal).unwrap_or(Goal::Maintain),
            diet_type: DietType::from_str(&diet_type).unwrap_or(DietType::Veg),
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the profile of a user
    pub fn get_by_user(conn: &Connection, user_id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM user_profiles WHERE user_id = ?1")?;

        match stmt.query_row([user_id], Self::from_row) {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set or replace the profile of a user (upsert)
    pub fn upsert(conn: &Connection, user_id: i64, data: &ProfileData) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO user_profiles
                (user_id, age, gender, height, weight, activity_level, goal, diet_type)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(user_id) DO UPDATE SET
                age = excluded.age,
                gender = excluded.gender,
                height = excluded.height,
                weight = excluded.weight,
                activity_level = excluded.activity_level,
                goal = excluded.goal,
                diet_type = excluded.diet_type,
                updated_at = datetime('now')
            "#,
            params![
                user_id,
                data.age,
                data.gender.as_str(),
                data.height,
                data.weight,
                data.activity_level.as_str(),
                data.goal.as_str(),
                data.diet_type.as_str(),
            ],
        )?;

        Self::get_by_user(conn, user_id)?.ok_or(DbError::NotFound("Profile"))
    }

    pub fn to_input(&self) -> RecommendationInput {
        RecommendationInput {
            age: self.age,
            gender: self.gender,
            height_cm: self.height,
            weight_kg: self.weight,
            activity_level: self.activity_level,
            goal: self.goal,
            diet_type: self.diet_type.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::User;

    fn data() -> ProfileData {
        ProfileData {
            age: 32,
            gender: Gender::Female,
            height: 162.0,
            weight: 58.5,
            activity_level: ActivityLevel::Light,
            goal: Goal::Maintain,
            diet_type: DietType::Vegan,
        }
    }

    #[test]
    fn test_upsert_keeps_one_row() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let user = User::get_or_create(&conn, "priya").unwrap();

        let created = UserProfile::upsert(&conn, user.id, &data()).unwrap();
        assert_eq!(created.diet_type, DietType::Vegan);

        let mut changed = data();
        changed.goal = Goal::Lose;
        changed.weight = 61.0;
        let updated = UserProfile::upsert(&conn, user.id, &changed).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.goal, Goal::Lose);
        assert_eq!(updated.weight, 61.0);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM user_profiles", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_to_input() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let user = User::get_or_create(&conn, "kabir").unwrap();
        assert!(UserProfile::get_by_user(&conn, user.id).unwrap().is_none());

        UserProfile::upsert(&conn, user.id, &data()).unwrap();

        let profile = UserProfile::get_by_user(&conn, user.id).unwrap().unwrap();
        let input = profile.to_input();
        assert_eq!(input.weight_kg, 58.5);
        assert_eq!(input.height_cm, 162.0);
        assert_eq!(input.diet_type, "vegan");
        assert_eq!(input.activity_level, ActivityLevel::Light);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_height() {
        let mut bad = data();
        bad.height = 95.0;
        assert!(bad.validate().is_err());
        assert!(data().validate().is_ok());
    }
}
