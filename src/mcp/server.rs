//! dietrec MCP Server Implementation
//!
//! Implements the MCP server with all diet recommendation tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::{migrations, Database};
use crate::engine::{ActivityLevel, DietType, Gender, Goal, RecommendationRequest};
use crate::models::ProfileData;
use crate::tools::status::StatusTracker;
use crate::tools::{profiles, recommend, weight_logs};

/// dietrec MCP Service
#[derive(Clone)]
pub struct DietService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<DietService>,
}

impl DietService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Calculation Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateDietParams {
    /// Age in years (10-100)
    pub age: i64,
    /// male or female
    pub gender: String,
    /// Height in cm (at least 100)
    pub height: f64,
    /// Weight in kg (at least 30)
    pub weight: f64,
    /// sedentary, light, moderate, veryActive
    pub activity_level: String,
    /// lose, maintain, gain
    pub goal: String,
    /// veg, nonveg, vegan
    pub diet_type: String,
    /// Save the result to this user's history (optional)
    pub username: Option<String>,
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetProfileParams {
    pub username: String,
    /// Age in years (10-100)
    pub age: u32,
    /// male or female
    pub gender: String,
    /// Height in cm (at least 100)
    pub height: f64,
    /// Weight in kg (at least 30)
    pub weight: f64,
    /// sedentary (default), light, moderate, veryActive
    pub activity_level: Option<String>,
    /// lose, maintain (default), gain
    pub goal: Option<String>,
    /// veg (default), nonveg, vegan
    pub diet_type: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UsernameParams {
    pub username: String,
}

// ============================================================================
// History Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRecommendationsParams {
    pub username: String,
    /// Maximum results (all if omitted)
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecommendationIdParams {
    pub username: String,
    /// Recommendation ID
    pub id: i64,
}

// ============================================================================
// Weight Log Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddWeightLogParams {
    pub username: String,
    /// Weight in kg (30-200)
    pub weight: f64,
    /// Date (YYYY-MM-DD), defaults to today
    pub date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListWeightLogsParams {
    pub username: String,
    /// Maximum results (all if omitted)
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WeightLogIdParams {
    pub username: String,
    /// Weight log ID
    pub id: i64,
}

/// Stored profiles only accept known choices; unlike `calculate_diet` there is no fallback.
fn parse_profile(p: SetProfileParams) -> Result<(String, ProfileData), McpError> {
    let gender = match p.gender.trim().to_lowercase().as_str() {
        "male" => Gender::Male,
        "female" => Gender::Female,
        other => {
            return Err(McpError::invalid_params(
                format!("Invalid gender '{}': expected male or female", other),
                None,
            ))
        }
    };
    let activity_level = match p.activity_level.as_deref() {
        None => ActivityLevel::Sedentary,
        Some(s) => ActivityLevel::from_str(s).ok_or_else(|| {
            McpError::invalid_params(
                format!("Invalid activity_level '{}': expected sedentary, light, moderate or veryActive", s),
                None,
            )
        })?,
    };
    let goal = match p.goal.as_deref() {
        None => Goal::Maintain,
        Some(s) => Goal::from_str(s).ok_or_else(|| {
            McpError::invalid_params(
                format!("Invalid goal '{}': expected lose, maintain or gain", s),
                None,
            )
        })?,
    };
    let diet_type = match p.diet_type.as_deref() {
        None => DietType::Veg,
        Some(s) => DietType::from_str(s).ok_or_else(|| {
            McpError::invalid_params(
                format!("Invalid diet_type '{}': expected veg, nonveg or vegan", s),
                None,
            )
        })?,
    };

    Ok((
        p.username,
        ProfileData {
            age: p.age,
            gender,
            height: p.height,
            weight: p.weight,
            activity_level,
            goal,
            diet_type,
        },
    ))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl DietService {
    // --- Status ---

    #[tool(description = "Get the current status of the dietrec service including build info, database status, and process information")]
    async fn dietrec_status(&self) -> Result<CallToolResult, McpError> {
        let schema_version = self
            .database
            .with_conn(migrations::get_schema_version)
            .ok();
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status(schema_version))
    }

    #[tool(description = "Get instructions for calculating diet recommendations, managing profiles and logging weight. Call this first when unsure how to use the tools.")]
    fn diet_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::DIET_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(DIET_INSTRUCTIONS)]))
    }

    // --- Calculation ---

    #[tool(description = "Calculate BMI, BMI category, daily calorie needs and a diet plan from body metrics. Pass username to save the result to that user's history.")]
    fn calculate_diet(&self, Parameters(p): Parameters<CalculateDietParams>) -> Result<CallToolResult, McpError> {
        let request = RecommendationRequest {
            age: p.age,
            gender: p.gender,
            height: p.height,
            weight: p.weight,
            activity_level: p.activity_level,
            goal: p.goal,
            diet_type: p.diet_type,
        };
        let result = recommend::calculate_diet(&self.database, request, p.username.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Calculate and save a diet recommendation from the user's stored profile")]
    fn recommend_from_profile(&self, Parameters(p): Parameters<UsernameParams>) -> Result<CallToolResult, McpError> {
        let result = recommend::recommend_from_profile(&self.database, &p.username)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Profiles ---

    #[tool(description = "Create or replace a user's health profile")]
    fn set_profile(&self, Parameters(p): Parameters<SetProfileParams>) -> Result<CallToolResult, McpError> {
        let (username, data) = parse_profile(p)?;
        let result = profiles::set_profile(&self.database, &username, &data)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a user's health profile")]
    fn get_profile(&self, Parameters(p): Parameters<UsernameParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::get_profile(&self.database, &p.username)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(profile) => to_json(&profile),
            None => to_json(&serde_json::json!({
                "error": "Profile not found",
                "username": p.username,
            })),
        }
    }

    #[tool(description = "Get a user's dashboard: profile, last 5 recommendations and last 10 weight logs")]
    fn get_dashboard(&self, Parameters(p): Parameters<UsernameParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::get_dashboard(&self.database, &p.username)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- History ---

    #[tool(description = "List a user's saved recommendations, newest first")]
    fn list_recommendations(&self, Parameters(p): Parameters<ListRecommendationsParams>) -> Result<CallToolResult, McpError> {
        let result = recommend::list_recommendations(&self.database, &p.username, p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a saved recommendation with its full meal plan and tips")]
    fn get_recommendation(&self, Parameters(p): Parameters<RecommendationIdParams>) -> Result<CallToolResult, McpError> {
        let result = recommend::get_recommendation(&self.database, &p.username, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(rec) => to_json(&rec),
            None => to_json(&serde_json::json!({
                "error": "Recommendation not found",
                "id": p.id,
            })),
        }
    }

    #[tool(description = "Delete a saved recommendation")]
    fn delete_recommendation(&self, Parameters(p): Parameters<RecommendationIdParams>) -> Result<CallToolResult, McpError> {
        let result = recommend::delete_recommendation(&self.database, &p.username, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Weight Logs ---

    #[tool(description = "Log a body weight in kg (30-200) for a user. Date defaults to today.")]
    fn add_weight_log(&self, Parameters(p): Parameters<AddWeightLogParams>) -> Result<CallToolResult, McpError> {
        let result = weight_logs::add_weight_log(
            &self.database,
            &p.username,
            p.weight,
            p.date.as_deref(),
            p.notes.as_deref(),
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List a user's weight logs, newest first, with the change between newest and oldest entry")]
    fn list_weight_logs(&self, Parameters(p): Parameters<ListWeightLogsParams>) -> Result<CallToolResult, McpError> {
        let result = weight_logs::list_weight_logs(&self.database, &p.username, p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a weight log entry")]
    fn delete_weight_log(&self, Parameters(p): Parameters<WeightLogIdParams>) -> Result<CallToolResult, McpError> {
        let result = weight_logs::delete_weight_log(&self.database, &p.username, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for DietService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "dietrec".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Diet Recommendation System".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Diet Recommendation System - BMI, calorie needs and diet plans. \
                 Call diet_instructions first. \
                 Calculation: calculate_diet (optionally saved with username), recommend_from_profile. \
                 Profiles: set_profile/get_profile, get_dashboard. \
                 History: list/get/delete_recommendation. \
                 Weight: add/list/delete_weight_log."
                    .into(),
            ),
        }
    }
}
