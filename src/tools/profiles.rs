//! Profile Tools
//!
//! Manage the stored health profile and build the dashboard overview.

use serde::Serialize;

use crate::db::Database;
use crate::models::{DietRecommendation, ProfileData, UserProfile, WeightLog};

use super::recommend::RecommendationSummary;
use super::weight_logs::WeightLogSummary;
use super::{ensure_user, find_user};

const DASHBOARD_RECOMMENDATIONS: i64 = 5;
const DASHBOARD_WEIGHT_LOGS: i64 = 10;

/// Profile with display labels
#[derive(Debug, Serialize)]
pub struct ProfileDetail {
    pub username: String,
    pub age: u32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub activity_level: String,
    pub activity_level_display: String,
    pub goal: String,
    pub goal_display: String,
    pub diet_type: String,
    pub diet_type_display: String,
    pub updated_at: String,
}

impl ProfileDetail {
    fn new(username: String, profile: UserProfile) -> Self {
        Self {
            username,
            age: profile.age,
            gender: profile.gender.as_str().to_string(),
            height: profile.height,
            weight: profile.weight,
            activity_level: profile.activity_level.as_str().to_string(),
            activity_level_display: profile.activity_level.display_name().to_string(),
            goal: profile.goal.as_str().to_string(),
            goal_display: profile.goal.display_name().to_string(),
            diet_type: profile.diet_type.as_str().to_string(),
            diet_type_display: profile.diet_type.display_name().to_string(),
            updated_at: profile.updated_at,
        }
    }
}

/// Response for get_dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub username: String,
    pub profile: Option<ProfileDetail>,
    pub recent_recommendations: Vec<RecommendationSummary>,
    pub recent_weight_logs: Vec<WeightLogSummary>,
}

/// Create or replace a user's profile
pub fn set_profile(db: &Database, username: &str, data: &ProfileData) -> Result<ProfileDetail, String> {
    data.validate().map_err(|e| e.to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let user = ensure_user(&conn, username)?;
    let profile = UserProfile::upsert(&conn, user.id, data)
        .map_err(|e| format!("Failed to save profile: {}", e))?;

    tracing::info!(username = %user.username, "profile updated");
    Ok(ProfileDetail::new(user.username, profile))
}

pub fn get_profile(db: &Database, username: &str) -> Result<Option<ProfileDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let Some(user) = find_user(&conn, username)? else {
        return Ok(None);
    };
    let profile = UserProfile::get_by_user(&conn, user.id)
        .map_err(|e| format!("Failed to get profile: {}", e))?;

    Ok(profile.map(|p| ProfileDetail::new(user.username, p)))
}

/// Profile plus the latest recommendations and weight logs
pub fn get_dashboard(db: &Database, username: &str) -> Result<DashboardResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let Some(user) = find_user(&conn, username)? else {
        return Ok(DashboardResponse {
            username: username.trim().to_string(),
            profile: None,
            recent_recommendations: Vec::new(),
            recent_weight_logs: Vec::new(),
        });
    };

    let profile = UserProfile::get_by_user(&conn, user.id)
        .map_err(|e| format!("Failed to get profile: {}", e))?;
    let recs = DietRecommendation::list_by_user(&conn, user.id, Some(DASHBOARD_RECOMMENDATIONS))
        .map_err(|e| format!("Failed to list recommendations: {}", e))?;
    let logs = WeightLog::list_by_user(&conn, user.id, Some(DASHBOARD_WEIGHT_LOGS))
        .map_err(|e| format!("Failed to list weight logs: {}", e))?;

    Ok(DashboardResponse {
        profile: profile.map(|p| ProfileDetail::new(user.username.clone(), p)),
        username: user.username,
        recent_recommendations: recs.iter().map(RecommendationSummary::from).collect(),
        recent_weight_logs: logs.iter().map(WeightLogSummary::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ActivityLevel, DietType, Gender, Goal, RecommendationRequest};
    use crate::tools::recommend::calculate_diet;
    use crate::tools::weight_logs::add_weight_log;

    fn data() -> ProfileData {
        ProfileData {
            age: 29,
            gender: Gender::Female,
            height: 158.0,
            weight: 52.0,
            activity_level: ActivityLevel::VeryActive,
            goal: Goal::Gain,
            diet_type: DietType::Nonveg,
        }
    }

    #[test]
    fn test_set_and_get_profile() {
        let db = Database::in_memory().unwrap();
        assert!(get_profile(&db, "lata").unwrap().is_none());

        let saved = set_profile(&db, "  lata ", &data()).unwrap();
        assert_eq!(saved.username, "lata");
        assert_eq!(saved.activity_level, "veryActive");
        assert_eq!(saved.diet_type_display, "Non-Vegetarian");

        let fetched = get_profile(&db, "lata").unwrap().unwrap();
        assert_eq!(fetched.goal, "gain");
        assert_eq!(fetched.height, 158.0);
    }

    #[test]
    fn test_set_profile_validates() {
        let db = Database::in_memory().unwrap();
        let mut bad = data();
        bad.age = 120;
        assert!(set_profile(&db, "lata", &bad).is_err());
        assert!(set_profile(&db, "   ", &data()).is_err());
    }

    #[test]
    fn test_dashboard_limits() {
        let db = Database::in_memory().unwrap();
        set_profile(&db, "rohan", &data()).unwrap();

        for i in 0..7 {
            let request = RecommendationRequest {
                age: 29,
                gender: "female".into(),
                height: 158.0,
                weight: 50.0 + f64::from(i),
                activity_level: "light".into(),
                goal: "gain".into(),
                diet_type: "nonveg".into(),
            };
            calculate_diet(&db, request, Some("rohan")).unwrap();
        }
        for day in 1..=12 {
            let date = format!("2025-04-{:02}", day);
            add_weight_log(&db, "rohan", 52.0 + f64::from(day) * 0.1, Some(&date), None).unwrap();
        }

        let dashboard = get_dashboard(&db, "rohan").unwrap();
        assert!(dashboard.profile.is_some());
        assert_eq!(dashboard.recent_recommendations.len(), 5);
        assert_eq!(dashboard.recent_weight_logs.len(), 10);
        assert_eq!(dashboard.recent_weight_logs[0].date, "2025-04-12");
    }

    #[test]
    fn test_dashboard_for_unknown_user_is_empty() {
        let db = Database::in_memory().unwrap();
        let dashboard = get_dashboard(&db, "ghost").unwrap();
        assert!(dashboard.profile.is_none());
        assert!(dashboard.recent_recommendations.is_empty());
    }
}
