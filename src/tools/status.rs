//! Status Tool
//!
//! Runtime status of the dietrec service and usage instructions for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Diet recommendation instructions for AI assistants
pub const DIET_INSTRUCTIONS: &str = r#"
# dietrec Instructions

## Quick calculation

Call `calculate_diet` with:

| Field | Values |
|-------|--------|
| age | 10-100 |
| gender | male, female |
| height | cm, at least 100 |
| weight | kg, at least 30 |
| activity_level | sedentary, light, moderate, veryActive |
| goal | lose, maintain, gain |
| diet_type | veg, nonveg, vegan |

Pass `username` to archive the result in that user's history. Without it nothing is stored.

Unrecognized values do not fail:
- any gender other than "male" uses the female BMR offset
- unknown activity_level uses the moderate multiplier (1.55)
- unknown goal leaves calories unchanged
- unknown diet_type returns the Balanced Vegetarian plan

## What comes back

- `bmi` rounded to 1 decimal, and its `category` (Underweight < 18.5 <= Healthy < 25 <= Overweight < 30 <= Obese)
- `tdee`: BMR x activity multiplier, whole calories
- `recommended_calories`: tdee - 400 to lose, + 400 to gain
- `diet_plan`: title, five meals, tips

## Profiles and history

1. `set_profile` stores age, gender, height, weight, activity level, goal and diet type
2. `recommend_from_profile` runs the calculation on the stored profile and archives it
3. `get_dashboard` shows the profile, the last 5 recommendations and the last 10 weight logs
4. `list_recommendations` / `get_recommendation` / `delete_recommendation` browse the archive

## Weight tracking

- `add_weight_log` takes weight in kg (30-200), optional date (YYYY-MM-DD, defaults to today) and notes
- `list_weight_logs` returns newest first with `change_kg` between newest and oldest entry returned

Logging a weight does not change the stored profile; update it with `set_profile` when needed.
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    #[serde(flatten)]
    pub build: BuildInfo,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub schema_version: Option<i32>,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Collects runtime information for the status tool
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    pub fn get_status(&self, schema_version: Option<i32>) -> ServiceStatus {
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build: BuildInfo::current(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            schema_version,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
