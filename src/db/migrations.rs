//! Database schema
//!
//! Creates the tables on first run and records the schema version.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    if needs_migration(conn)? {
        tracing::info!(version = SCHEMA_VERSION, "creating database schema");
        create_schema(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

fn create_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- USERS
        -- Owner of profiles, recommendations and logs
        -- ============================================
        CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- USER PROFILES
        -- One health profile per user
        -- ============================================
        CREATE TABLE user_profiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            age INTEGER NOT NULL CHECK(age BETWEEN 10 AND 100),
            gender TEXT NOT NULL CHECK(gender IN ('male', 'female')),
            height REAL NOT NULL CHECK(height >= 100),   -- cm
            weight REAL NOT NULL CHECK(weight >= 30),    -- kg
            activity_level TEXT NOT NULL DEFAULT 'sedentary'
                CHECK(activity_level IN ('sedentary', 'light', 'moderate', 'veryActive')),
            goal TEXT NOT NULL DEFAULT 'maintain' CHECK(goal IN ('lose', 'maintain', 'gain')),
            diet_type TEXT NOT NULL DEFAULT 'veg' CHECK(diet_type IN ('veg', 'nonveg', 'vegan')),
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- DIET RECOMMENDATIONS
        -- Archived engine results
        -- ============================================
        CREATE TABLE diet_recommendations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            bmi REAL NOT NULL,
            bmi_category TEXT NOT NULL,
            tdee INTEGER NOT NULL,
            recommended_calories INTEGER NOT NULL,
            diet_type TEXT NOT NULL,
            diet_plan_title TEXT NOT NULL,
            meals TEXT NOT NULL,                 -- JSON array of strings
            tips TEXT NOT NULL,                  -- JSON array of strings
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX idx_recommendations_user ON diet_recommendations(user_id, created_at);

        -- ============================================
        -- WEIGHT LOGS
        -- ============================================
        CREATE TABLE weight_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            weight REAL NOT NULL,                -- kg
            date TEXT NOT NULL,                  -- ISO date: "2025-01-09"
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_weight_logs_user ON weight_logs(user_id, date);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    Ok(get_schema_version(conn)? < SCHEMA_VERSION)
}
