use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::records::SeriesRecord;

pub fn insert_series(conn: &Connection, series: &SeriesRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO series (id, name, color) VALUES (?1, ?2, ?3)",
        params![series.id, series.name, series.color],
    )
    .context("Failed to insert series")?;
    Ok(())
}
