use std::path::Path;

use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccessMode {
    /// Snapshot readers: the engine never writes
    ReadOnly,
    /// Importer
    ReadWrite,
}

pub fn create_pool(database_path: &str, mode: AccessMode) -> Result<DbPool> {
    if mode == AccessMode::ReadOnly && !Path::new(database_path).exists() {
        anyhow::bail!("Database {} not found, run `import` first", database_path);
    }

    let manager = build_manager(database_path, mode);
    build_pool(manager).with_context(|| format!("Failed to open database {}", database_path))
}

fn build_manager(path: &str, mode: AccessMode) -> SqliteConnectionManager {
    let manager = SqliteConnectionManager::file(path);
    let manager = match mode {
        AccessMode::ReadOnly => manager.with_flags(
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        ),
        AccessMode::ReadWrite => manager,
    };
    manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"))
}

fn build_pool(manager: SqliteConnectionManager) -> Result<DbPool> {
    r2d2::Pool::builder()
        .build(manager)
        .context("Failed to create database connection pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}
