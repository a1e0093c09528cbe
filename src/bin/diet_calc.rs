//! One-shot diet calculation
//!
//! Reads a request as JSON on stdin and prints the recommendation as JSON:
//!
//! ```text
//! echo '{"age":25,"gender":"male","height":170,"weight":70,
//!        "activity_level":"moderate","goal":"lose","diet_type":"veg"}' | diet_calc
//! ```
//!
//! Nothing is stored.

use std::io::Read;

use dietrec::config;
use dietrec::engine::{predict, RecommendationRequest};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config::DEFAULT_LOG_DIRECTIVE.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;

    let request: RecommendationRequest = serde_json::from_str(&raw)?;
    let input = request.into_input()?;
    let result = predict(&input)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
