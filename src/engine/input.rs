//! Recommendation inputs
//!
//! Typed body metrics plus the string-based request form accepted from callers.
//! Enum parsing is lenient where the pipeline defines a fallback.

use serde::{Deserialize, Serialize};

use super::EngineError;

pub const MIN_AGE: u32 = 10;
pub const MAX_AGE: u32 = 100;
pub const MIN_HEIGHT_CM: f64 = 100.0;
pub const MIN_WEIGHT_KG: f64 = 30.0;

/// Gender used for the BMR offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// "male" in any case is male; every other value takes the female offset.
    pub fn from_str_lossy(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("male") {
            return Gender::Male;
        }
        if !s.eq_ignore_ascii_case("female") {
            tracing::warn!(gender = s, "unrecognized gender, using female BMR offset");
        }
        Gender::Female
    }

    /// Constant term of the BMR equation
    pub fn bmr_offset(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        }
    }
}

/// Activity level for the TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::VeryActive => "veryActive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "veryActive" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    /// Unrecognized levels count as moderate.
    pub fn from_str_lossy(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            tracing::warn!(activity_level = s, "unrecognized activity level, using moderate");
            ActivityLevel::Moderate
        })
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::VeryActive => 1.725,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little/no exercise)",
            ActivityLevel::Light => "Lightly Active (1-3 days/week)",
            ActivityLevel::Moderate => "Moderately Active (3-5 days/week)",
            ActivityLevel::VeryActive => "Very Active (6-7 days/week)",
        }
    }
}

/// Weight goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "lose" => Some(Goal::Lose),
            "maintain" => Some(Goal::Maintain),
            "gain" => Some(Goal::Gain),
            _ => None,
        }
    }

    /// Unrecognized goals leave calories unchanged.
    pub fn from_str_lossy(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            tracing::warn!(goal = s, "unrecognized goal, using maintain");
            Goal::Maintain
        })
    }

    /// Daily calorie offset applied to TDEE
    pub fn calorie_offset(&self) -> f64 {
        match self {
            Goal::Lose => -400.0,
            Goal::Maintain => 0.0,
            Goal::Gain => 400.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Goal::Lose => "Lose Weight",
            Goal::Maintain => "Maintain Weight",
            Goal::Gain => "Gain Weight",
        }
    }
}

/// Dietary preference, second key of the plan table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    Veg,
    Nonveg,
    Vegan,
}

impl DietType {
    pub const ALL: [DietType; 3] = [DietType::Veg, DietType::Nonveg, DietType::Vegan];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Veg => "veg",
            DietType::Nonveg => "nonveg",
            DietType::Vegan => "vegan",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "veg" => Some(DietType::Veg),
            "nonveg" => Some(DietType::Nonveg),
            "vegan" => Some(DietType::Vegan),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DietType::Veg => "Vegetarian",
            DietType::Nonveg => "Non-Vegetarian",
            DietType::Vegan => "Vegan",
        }
    }
}

/// Validated-shape input to [`super::predict`]
///
/// `diet_type` stays a string: an unknown preference is not an error, it selects
/// the default plan and is echoed back in the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationInput {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub diet_type: String,
}

impl RecommendationInput {
    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(EngineError::invalid(
                "age",
                format!("must be between {} and {} (got {})", MIN_AGE, MAX_AGE, self.age),
            ));
        }
        if !self.height_cm.is_finite() {
            return Err(EngineError::invalid("height_cm", "must be a finite number"));
        }
        if self.height_cm < MIN_HEIGHT_CM {
            return Err(EngineError::invalid(
                "height_cm",
                format!("must be at least {} (got {})", MIN_HEIGHT_CM, self.height_cm),
            ));
        }
        if !self.weight_kg.is_finite() {
            return Err(EngineError::invalid("weight_kg", "must be a finite number"));
        }
        if self.weight_kg < MIN_WEIGHT_KG {
            return Err(EngineError::invalid(
                "weight_kg",
                format!("must be at least {} (got {})", MIN_WEIGHT_KG, self.weight_kg),
            ));
        }
        Ok(())
    }
}

/// Request as it arrives from a caller, with free-form enum strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub age: i64,
    pub gender: String,
    /// Height in cm
    #[serde(alias = "height_cm")]
    pub height: f64,
    /// Weight in kg
    #[serde(alias = "weight_kg")]
    pub weight: f64,
    pub activity_level: String,
    pub goal: String,
    pub diet_type: String,
}

impl RecommendationRequest {
    /// Convert to typed input, applying the lenient enum fallbacks.
    /// Range checks happen in [`RecommendationInput::validate`].
    pub fn into_input(self) -> Result<RecommendationInput, EngineError> {
        let age = u32::try_from(self.age).map_err(|_| {
            EngineError::invalid(
                "age",
                format!("must be between {} and {} (got {})", MIN_AGE, MAX_AGE, self.age),
            )
        })?;

        Ok(RecommendationInput {
            age,
            gender: Gender::from_str_lossy(&self.gender),
            height_cm: self.height,
            weight_kg: self.weight,
            activity_level: ActivityLevel::from_str_lossy(&self.activity_level),
            goal: Goal::from_str_lossy(&self.goal),
            diet_type: self.diet_type,
        })
    }
}
