use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::domain::ResultStatus;
use crate::records::{CourseRecord, ResultRecord};

pub fn insert_course(conn: &Connection, course: &CourseRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO courses (id, event_id, name) VALUES (?1, ?2, ?3)",
        params![course.id, course.event_id, course.name],
    )
    .context("Failed to insert course")?;
    Ok(())
}

pub fn insert_result(conn: &Connection, result: &ResultRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO results (id, course_id, status) VALUES (?1, ?2, ?3)",
        params![result.id, result.course_id, result.status.as_str()],
    )
    .context("Failed to insert result")?;
    Ok(())
}

/// Statuses of every result on the event's courses
pub fn statuses_for_event(conn: &Connection, event_id: i64) -> Result<Vec<ResultStatus>> {
    let sql = "SELECT r.status FROM results r JOIN courses c ON c.id = r.course_id \
        WHERE c.event_id = ?1";

    let mut stmt = conn.prepare(sql)?;
    let statuses = stmt
        .query_map(params![event_id], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to query result statuses")?;

    Ok(statuses.iter().map(|s| ResultStatus::parse(s)).collect())
}

/// Participants per event, for every event with at least one starter
pub fn participant_counts(conn: &Connection) -> Result<HashMap<i64, i64>> {
    let sql = "SELECT c.event_id, COUNT(r.id) FROM results r JOIN courses c ON c.id = r.course_id \
        WHERE r.status != 'did_not_start' GROUP BY c.event_id";

    let mut stmt = conn.prepare(sql)?;
    let counts = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<rusqlite::Result<HashMap<_, _>>>()
        .context("Failed to count participants")?;

    Ok(counts)
}
