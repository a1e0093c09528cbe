//! Body metric calculations
//!
//! BMI, BMI category, basal and total daily energy expenditure, goal adjustment.

use serde::{Deserialize, Serialize};

use super::input::{ActivityLevel, Gender, Goal};
use super::EngineError;

/// BMI band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Healthy,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Healthy => "Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Underweight" => Some(BmiCategory::Underweight),
            "Healthy" => Some(BmiCategory::Healthy),
            "Overweight" => Some(BmiCategory::Overweight),
            "Obese" => Some(BmiCategory::Obese),
            _ => None,
        }
    }
}

/// Body mass index: weight / (height in metres)^2
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Result<f64, EngineError> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(EngineError::DivisionHazard(height_cm));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(EngineError::invalid("weight_kg", "must be a positive number"));
    }

    let height_m = height_cm / 100.0;
    Ok(weight_kg / height_m.powi(2))
}

/// Lower bound of each band is inclusive.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Healthy
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Basal metabolic rate (Mifflin-St Jeor form)
///
/// `BMR = 10 * weight_kg + 6.25 * height_cm - 5 * age + s`, with s = +5 for men
/// and -161 for women.
pub fn compute_bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + gender.bmr_offset()
}

/// Total daily energy expenditure: BMR scaled by the activity multiplier
pub fn compute_baseline_energy(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    activity_level: ActivityLevel,
) -> f64 {
    compute_bmr(weight_kg, height_cm, age, gender) * activity_level.multiplier()
}

pub fn adjust_for_goal(tdee: f64, goal: Goal) -> f64 {
    tdee + goal.calorie_offset()
}

/// Round to one decimal place, halves away from zero
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to whole calories, halves away from zero
pub fn round_calories(value: f64) -> i64 {
    value.round() as i64
}
