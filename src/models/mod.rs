//! Data models
//!
//! Rust structs representing database entities.

mod profile;
mod recommendation;
mod user;
mod weight_log;

pub use profile::{ProfileData, UserProfile};
pub use recommendation::DietRecommendation;
pub use user::User;
pub use weight_log::{WeightLog, WeightLogCreate, MAX_LOG_WEIGHT_KG, MIN_LOG_WEIGHT_KG};
