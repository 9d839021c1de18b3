use anyhow::{Context, Result};
use rusqlite::Connection;

use super::connection::{create_pool, get_connection, AccessMode, DbPool};

/// Drops and recreates every table
pub fn reset_database(conn: &Connection) -> Result<()> {
    let schema_sql = include_str!("schema.sql");

    conn.execute_batch(schema_sql)
        .context("Failed to apply database schema")?;

    log::info!("Database schema reset successfully");
    Ok(())
}

/// Whether the schema has been applied to this database
pub fn is_initialized(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'events'",
            [],
            |row| row.get(0),
        )
        .context("Failed to inspect database schema")?;
    Ok(count > 0)
}

/// Read-only pool over a database that has been through `import`
pub fn open_calendar_db(path: &str) -> Result<DbPool> {
    let pool = create_pool(path, AccessMode::ReadOnly)?;
    let conn = get_connection(&pool)?;
    if !is_initialized(&conn)? {
        anyhow::bail!("Database {} has no calendar tables, run `import` first", path);
    }
    drop(conn);
    Ok(pool)
}
