//! Diet recommendation engine
//!
//! Stateless pipeline: BMI, category, energy need, goal adjustment, plan lookup.
//! No I/O and no shared state, so every function here is safe to call from any thread.

mod input;
mod metrics;
mod plans;

pub use input::{
    ActivityLevel, DietType, Gender, Goal, RecommendationInput, RecommendationRequest,
    MAX_AGE, MIN_AGE, MIN_HEIGHT_CM, MIN_WEIGHT_KG,
};
pub use metrics::{
    adjust_for_goal, classify_bmi, compute_baseline_energy, compute_bmi, compute_bmr,
    round_calories, round_one_decimal, BmiCategory,
};
pub use plans::{default_plan, lookup_diet_plan, plan_for, DietPlan};

use serde::Serialize;
use thiserror::Error;

/// Engine error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Cannot compute BMI for height {0} cm")]
    DivisionHazard(f64),
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Output of [`predict`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    /// Rounded to one decimal
    pub bmi: f64,
    pub category: BmiCategory,
    pub tdee: i64,
    pub recommended_calories: i64,
    pub diet_plan: DietPlan,
    pub diet_type: String,
}

/// Whole calories, refusing values an `i64` cannot hold
fn checked_calories(field: &'static str, value: f64) -> Result<i64, EngineError> {
    if !value.is_finite() || value.abs() >= i64::MAX as f64 {
        return Err(EngineError::invalid(field, format!("energy need out of range ({})", value)));
    }
    Ok(round_calories(value))
}

/// Run the full recommendation pipeline.
///
/// Rounding happens only here, halves away from zero.
pub fn predict(input: &RecommendationInput) -> Result<RecommendationResult, EngineError> {
    input.validate()?;

    let bmi = compute_bmi(input.weight_kg, input.height_cm)?;
    let category = classify_bmi(bmi);
    let tdee = compute_baseline_energy(
        input.weight_kg,
        input.height_cm,
        input.age,
        input.gender,
        input.activity_level,
    );
    let recommended_calories = adjust_for_goal(tdee, input.goal);
    let diet_plan = *lookup_diet_plan(category, &input.diet_type);

    tracing::debug!(
        bmi,
        category = category.as_str(),
        tdee,
        recommended_calories,
        plan = diet_plan.title,
        "computed recommendation"
    );

    Ok(RecommendationResult {
        bmi: round_one_decimal(bmi),
        category,
        tdee: checked_calories("tdee", tdee)?,
        recommended_calories: checked_calories("recommended_calories", recommended_calories)?,
        diet_plan,
        diet_type: input.diet_type.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(weight_kg: f64, height_cm: f64) -> RecommendationInput {
        RecommendationInput {
            age: 25,
            gender: Gender::Male,
            height_cm,
            weight_kg,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Lose,
            diet_type: "veg".to_string(),
        }
    }

    #[test]
    fn test_predict_reference_case() {
        let result = predict(&input(70.0, 170.0)).unwrap();
        assert_eq!(result.bmi, 24.2);
        assert_eq!(result.category, BmiCategory::Healthy);
        // bmr = 700 + 1062.5 - 125 + 5 = 1642.5; 1642.5 * 1.55 = 2545.875
        assert_eq!(result.tdee, 2546);
        assert_eq!(result.recommended_calories, 2146);
        assert_eq!(result.diet_plan.title, "Balanced Vegetarian Diet");
        assert_eq!(result.diet_type, "veg");
    }

    #[test]
    fn test_predict_underweight() {
        let result = predict(&input(45.0, 180.0)).unwrap();
        assert_eq!(result.bmi, 13.9);
        assert_eq!(result.category, BmiCategory::Underweight);
        assert_eq!(result.diet_plan.title, "High-Calorie Vegetarian Diet");
    }

    #[test]
    fn test_predict_obese() {
        let result = predict(&input(90.0, 160.0)).unwrap();
        assert_eq!(result.bmi, 35.2);
        assert_eq!(result.category, BmiCategory::Obese);
    }

    #[test]
    fn test_predict_is_idempotent() {
        let i = input(82.3, 177.4);
        assert_eq!(predict(&i).unwrap(), predict(&i).unwrap());
    }

    #[test]
    fn test_predict_goals_shift_calories() {
        let mut i = input(70.0, 170.0);
        i.goal = Goal::Gain;
        let gain = predict(&i).unwrap();
        i.goal = Goal::Maintain;
        let maintain = predict(&i).unwrap();
        assert_eq!(maintain.recommended_calories, maintain.tdee);
        assert_eq!(gain.recommended_calories, 2946);
    }

    #[test]
    fn test_predict_unknown_diet_type_keeps_echo() {
        let mut i = input(90.0, 160.0);
        i.diet_type = "keto".to_string();
        let result = predict(&i).unwrap();
        assert_eq!(result.category, BmiCategory::Obese);
        assert_eq!(result.diet_plan.title, "Balanced Vegetarian Diet");
        assert_eq!(result.diet_type, "keto");
    }

    #[test]
    fn test_predict_refuses_out_of_range() {
        assert!(matches!(
            predict(&input(25.0, 170.0)),
            Err(EngineError::InvalidInput { field: "weight_kg", .. })
        ));
        assert!(matches!(
            predict(&input(70.0, 0.0)),
            Err(EngineError::InvalidInput { field: "height_cm", .. })
        ));
    }

    #[test]
    fn test_predict_refuses_unrepresentable_calories() {
        assert!(matches!(
            predict(&input(1e308, 170.0)),
            Err(EngineError::InvalidInput { field: "tdee", .. })
        ));
        assert!(matches!(
            predict(&input(1e20, 170.0)),
            Err(EngineError::InvalidInput { field: "tdee", .. })
        ));
        assert!(predict(&input(500.0, 170.0)).is_ok());
    }

    #[test]
    fn test_predict_from_request_with_fallbacks() {
        let request = RecommendationRequest {
            age: 40,
            gender: "nonbinary".into(),
            height: 165.0,
            weight: 72.0,
            activity_level: "extreme".into(),
            goal: "recomp".into(),
            diet_type: "nonveg".into(),
        };
        let result = predict(&request.into_input().unwrap()).unwrap();
        // female offset, moderate multiplier, no goal offset
        let bmr = 720.0 + 1031.25 - 200.0 - 161.0;
        assert_eq!(result.tdee, round_calories(bmr * 1.55));
        assert_eq!(result.recommended_calories, result.tdee);
        assert_eq!(result.category, BmiCategory::Overweight);
        assert_eq!(result.diet_plan.title, "Calorie-Controlled Non-Vegetarian Diet");
    }

    #[test]
    fn test_result_serializes_category_name() {
        let result = predict(&input(70.0, 170.0)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["category"], "Healthy");
        assert_eq!(json["diet_plan"]["meals"].as_array().unwrap().len(), 5);
    }
}
