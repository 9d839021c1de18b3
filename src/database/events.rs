use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::EventRow;
use crate::records::EventRecord;

const EVENT_SELECT: &str = "SELECT e.id, e.name, e.club_id, e.event_classification_id, \
    e.lat, e.lng, e.date, e.finish_date, e.description, e.number_of_participants, \
    s.id, s.name, s.color FROM events e LEFT JOIN series s ON s.id = e.series_id";

pub fn insert_event(conn: &Connection, event: &EventRecord) -> Result<()> {
    let sql = "INSERT INTO events (id, name, club_id, series_id, event_classification_id, \
        lat, lng, date, finish_date, description, number_of_participants) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

    conn.execute(
        sql,
        params![
            event.id,
            event.name,
            event.club_id,
            event.series_id,
            event.event_classification_id,
            event.lat,
            event.lng,
            event.date,
            event.finish_date,
            event.description,
            event.number_of_participants
        ],
    )
    .context("Failed to insert event")?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<EventRow>> {
    let sql = format!("{EVENT_SELECT} WHERE e.id = ?1");

    conn.query_row(&sql, params![id], parse_event_row)
        .optional()
        .context("Failed to query event by id")
}

pub fn list_all(conn: &Connection) -> Result<Vec<EventRow>> {
    let sql = format!("{EVENT_SELECT} ORDER BY e.date, e.id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_event_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list events")?;

    Ok(rows)
}

/// Most recent events organized by a club, newest first
pub fn list_recent_for_club(
    conn: &Connection,
    club_id: i64,
    limit: usize,
) -> Result<Vec<EventRow>> {
    let sql =
        format!("{EVENT_SELECT} WHERE e.club_id = ?1 ORDER BY e.date DESC, e.id DESC LIMIT ?2");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![club_id, limit as i64], parse_event_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list club events")?;

    Ok(rows)
}

fn parse_event_row(row: &rusqlite::Row) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        name: row.get(1)?,
        club_id: row.get(2)?,
        event_classification_id: row.get(3)?,
        lat: row.get(4)?,
        lng: row.get(5)?,
        date: row.get(6)?,
        finish_date: row.get(7)?,
        description: row.get(8)?,
        number_of_participants: row.get(9)?,
        series_id: row.get(10)?,
        series_name: row.get(11)?,
        series_color: row.get(12)?,
    })
}
