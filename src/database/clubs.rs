use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::ClubRow;
use crate::records::ClubRecord;

const CLUB_COLUMNS: &str = "id, name, acronym, lat, lng, parent_id, timezone, site_url";

pub fn insert_club(conn: &Connection, club: &ClubRecord) -> Result<()> {
    let sql = "INSERT INTO clubs (id, name, acronym, lat, lng, parent_id, timezone, site_url) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

    conn.execute(
        sql,
        params![
            club.id,
            club.name,
            club.acronym,
            club.lat,
            club.lng,
            club.parent_id,
            club.timezone,
            club.site_url
        ],
    )
    .context("Failed to insert club")?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<ClubRow>> {
    let sql = format!("SELECT {CLUB_COLUMNS} FROM clubs WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_club_row)
        .optional()
        .context("Failed to query club by id")
}

pub fn list_all(conn: &Connection) -> Result<Vec<ClubRow>> {
    let sql = format!("SELECT {CLUB_COLUMNS} FROM clubs ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_club_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list clubs")?;

    Ok(rows)
}

fn parse_club_row(row: &rusqlite::Row) -> rusqlite::Result<ClubRow> {
    Ok(ClubRow {
        id: row.get(0)?,
        name: row.get(1)?,
        acronym: row.get(2)?,
        lat: row.get(3)?,
        lng: row.get(4)?,
        parent_id: row.get(5)?,
        timezone: row.get(6)?,
        site_url: row.get(7)?,
    })
}
