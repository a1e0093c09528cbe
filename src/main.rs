//! Diet Recommendation System (dietrec)
//!
//! An MCP server for BMI, calorie needs and diet plans.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use dietrec::mcp::DietService;
use dietrec::{build_info, config, db};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the MCP stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config::DEFAULT_LOG_DIRECTIVE.parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Banner goes to stderr as well
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    // Resolve database location (env override or <root>/data)
    let db_path = config::get_database_path();
    eprintln!("Database path: {}", db_path.display());

    // Make sure the data directory exists before SQLite opens the file
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Open the connection pool
    eprintln!("Initializing database...");
    let database = db::Database::new(&db_path)?;

    // Create or upgrade the schema
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    // Build the tool service
    let service = DietService::new(db_path, database);

    // Serve MCP over stdin/stdout until the client disconnects
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
