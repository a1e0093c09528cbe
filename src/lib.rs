//! Diet Recommendation System (dietrec) Library
//!
//! BMI, daily energy needs and diet plans, with per-user history.

pub mod build_info;
pub mod config;
pub mod db;
pub mod engine;
pub mod mcp;
pub mod models;
pub mod tools;
