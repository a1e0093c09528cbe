//! Recommendation Tools
//!
//! Run the engine, archive results, and browse recommendation history.

use serde::Serialize;

use crate::db::Database;
use crate::engine::{predict, RecommendationRequest, RecommendationResult};
use crate::models::{DietRecommendation, UserProfile};

use super::{ensure_user, find_user, DeleteResponse};

/// Response for calculate_diet and recommend_from_profile
#[derive(Debug, Serialize)]
pub struct CalculateDietResponse {
    #[serde(flatten)]
    pub result: RecommendationResult,
    /// Id of the archived copy, when the result was saved for a user
    pub recommendation_id: Option<i64>,
}

/// Recommendation summary for listing
#[derive(Debug, Serialize)]
pub struct RecommendationSummary {
    pub id: i64,
    pub bmi: f64,
    pub bmi_category: String,
    pub tdee: i64,
    pub recommended_calories: i64,
    pub diet_type: String,
    pub diet_plan_title: String,
    pub created_at: String,
}

impl From<&DietRecommendation> for RecommendationSummary {
    fn from(rec: &DietRecommendation) -> Self {
        Self {
            id: rec.id,
            bmi: rec.bmi,
            bmi_category: rec.bmi_category.as_str().to_string(),
            tdee: rec.tdee,
            recommended_calories: rec.recommended_calories,
            diet_type: rec.diet_type.clone(),
            diet_plan_title: rec.diet_plan_title.clone(),
            created_at: rec.created_at.clone(),
        }
    }
}

/// Response for list_recommendations
#[derive(Debug, Serialize)]
pub struct ListRecommendationsResponse {
    pub username: String,
    pub recommendations: Vec<RecommendationSummary>,
    pub total: i64,
}

/// Compute a recommendation; archive it when a username is given
pub fn calculate_diet(
    db: &Database,
    request: RecommendationRequest,
    username: Option<&str>,
) -> Result<CalculateDietResponse, String> {
    let input = request.into_input().map_err(|e| e.to_string())?;
    let result = predict(&input).map_err(|e| e.to_string())?;

    let recommendation_id = match username {
        Some(name) => {
            let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
            let user = ensure_user(&conn, name)?;
            let stored = DietRecommendation::create(&conn, user.id, &result)
                .map_err(|e| format!("Failed to save recommendation: {}", e))?;
            tracing::info!(
                username = %user.username,
                id = stored.id,
                category = result.category.as_str(),
                "saved recommendation"
            );
            Some(stored.id)
        }
        None => None,
    };

    Ok(CalculateDietResponse {
        result,
        recommendation_id,
    })
}

/// Compute and archive a recommendation from the user's stored profile
pub fn recommend_from_profile(db: &Database, username: &str) -> Result<CalculateDietResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let user = find_user(&conn, username)?
        .ok_or_else(|| format!("No profile found for user '{}'", username.trim()))?;
    let profile = UserProfile::get_by_user(&conn, user.id)
        .map_err(|e| format!("Failed to get profile: {}", e))?
        .ok_or_else(|| format!("No profile found for user '{}'", user.username))?;

    let result = predict(&profile.to_input()).map_err(|e| e.to_string())?;
    let stored = DietRecommendation::create(&conn, user.id, &result)
        .map_err(|e| format!("Failed to save recommendation: {}", e))?;
    tracing::info!(username = %user.username, id = stored.id, "saved profile recommendation");

    Ok(CalculateDietResponse {
        result,
        recommendation_id: Some(stored.id),
    })
}

/// List a user's recommendation history, newest first
pub fn list_recommendations(
    db: &Database,
    username: &str,
    limit: Option<i64>,
) -> Result<ListRecommendationsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let Some(user) = find_user(&conn, username)? else {
        return Ok(ListRecommendationsResponse {
            username: username.trim().to_string(),
            recommendations: Vec::new(),
            total: 0,
        });
    };

    let recs = DietRecommendation::list_by_user(&conn, user.id, limit)
        .map_err(|e| format!("Failed to list recommendations: {}", e))?;
    let total = DietRecommendation::count_by_user(&conn, user.id)
        .map_err(|e| format!("Failed to count recommendations: {}", e))?;

    Ok(ListRecommendationsResponse {
        username: user.username,
        recommendations: recs.iter().map(RecommendationSummary::from).collect(),
        total,
    })
}

/// Get one archived recommendation with its meals and tips
pub fn get_recommendation(
    db: &Database,
    username: &str,
    id: i64,
) -> Result<Option<DietRecommendation>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    match find_user(&conn, username)? {
        Some(user) => DietRecommendation::get_for_user(&conn, id, user.id)
            .map_err(|e| format!("Failed to get recommendation: {}", e)),
        None => Ok(None),
    }
}

pub fn delete_recommendation(db: &Database, username: &str, id: i64) -> Result<DeleteResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let success = match find_user(&conn, username)? {
        Some(user) => DietRecommendation::delete(&conn, id, user.id)
            .map_err(|e| format!("Failed to delete recommendation: {}", e))?,
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
    use crate::engine::{ActivityLevel, DietType, Gender, Goal};
    use crate::models::ProfileData;
    use crate::tools::profiles::set_profile;

    fn request() -> RecommendationRequest {
        RecommendationRequest {
            age: 25,
            gender: "male".into(),
            height: 170.0,
            weight: 70.0,
            activity_level: "moderate".into(),
            goal: "lose".into(),
            diet_type: "veg".into(),
        }
    }

    #[test]
    fn test_calculate_without_user_is_not_saved() {
        let db = Database::in_memory().unwrap();
        let response = calculate_diet(&db, request(), None).unwrap();
        assert_eq!(response.recommendation_id, None);
        assert_eq!(response.result.bmi, 24.2);

        let listed = list_recommendations(&db, "anyone", None).unwrap();
        assert_eq!(listed.total, 0);
    }

    #[test]
    fn test_calculate_with_user_is_archived() {
        let db = Database::in_memory().unwrap();
        let response = calculate_diet(&db, request(), Some("asha")).unwrap();
        let id = response.recommendation_id.unwrap();

        let stored = get_recommendation(&db, "asha", id).unwrap().unwrap();
        assert_eq!(stored.diet_plan_title, "Balanced Vegetarian Diet");
        assert_eq!(stored.recommended_calories, response.result.recommended_calories);
        assert!(get_recommendation(&db, "someone_else", id).unwrap().is_none());
    }

    #[test]
    fn test_calculate_rejects_invalid_input() {
        let db = Database::in_memory().unwrap();
        let mut bad = request();
        bad.age = 7;
        let err = calculate_diet(&db, bad, Some("asha")).unwrap_err();
        assert!(err.contains("age"));
        assert_eq!(list_recommendations(&db, "asha", None).unwrap().total, 0);
    }

    #[test]
    fn test_calculate_serializes_flat() {
        let db = Database::in_memory().unwrap();
        let response = calculate_diet(&db, request(), None).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["category"], "Healthy");
        assert_eq!(json["diet_plan"]["title"], "Balanced Vegetarian Diet");
        assert!(json["recommendation_id"].is_null());
    }

    #[test]
    fn test_recommend_from_profile() {
        let db = Database::in_memory().unwrap();
        assert!(recommend_from_profile(&db, "dev").is_err());

        set_profile(
            &db,
            "dev",
            &ProfileData {
                age: 40,
                gender: Gender::Male,
                height: 160.0,
                weight: 90.0,
                activity_level: ActivityLevel::Sedentary,
                goal: Goal::Lose,
                diet_type: DietType::Vegan,
            },
        )
        .unwrap();

        let response = recommend_from_profile(&db, "dev").unwrap();
        assert_eq!(response.result.diet_plan.title, "Intensive Weight Loss Vegan Diet");
        assert_eq!(response.result.diet_type, "vegan");

        let listed = list_recommendations(&db, "dev", Some(5)).unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(listed.recommendations[0].bmi_category, "Obese");
    }

    #[test]
    fn test_delete_recommendation() {
        let db = Database::in_memory().unwrap();
        let id = calculate_diet(&db, request(), Some("asha"))
            .unwrap()
            .recommendation_id
            .unwrap();

        assert!(!delete_recommendation(&db, "intruder", id).unwrap().success);
        assert!(delete_recommendation(&db, "asha", id).unwrap().success);
        assert!(get_recommendation(&db, "asha", id).unwrap().is_none());
    }
}
