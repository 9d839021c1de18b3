use std::collections::HashMap;

use anyhow::Result;
use log::debug;
use rusqlite::Connection;

use super::models::{ClubRow, EventRow};
use super::{clubs, events, results};
use crate::domain::{Club, Event, Snapshot};
use crate::errors::with_load_context;

/// Reads every club and event into an immutable snapshot
pub fn load_snapshot(conn: &Connection) -> Result<Snapshot> {
    let clubs: Vec<Club> = clubs::list_all(conn)?
        .into_iter()
        .map(ClubRow::into_club)
        .collect();

    let counts = results::participant_counts(conn)?;
    let events = events::list_all(conn)?
        .into_iter()
        .map(|row| resolve_event(row, &counts))
        .collect::<Result<Vec<_>>>()?;

    debug!("Loaded snapshot with {} clubs and {} events", clubs.len(), events.len());
    with_load_context(Snapshot::new(clubs, events), "club snapshot")
}

/// The club's most recent events, newest first
pub fn load_recent_club_events(
    conn: &Connection,
    club_id: i64,
    limit: usize,
) -> Result<Vec<Event>> {
    events::list_recent_for_club(conn, club_id, limit)?
        .into_iter()
        .map(|row| {
            let statuses = results::statuses_for_event(conn, row.id)?;
            let event = with_load_context(row.into_event(), "event")?;
            let count = event.number_of_participants(&statuses);
            Ok(Event {
                participant_count: Some(count),
                ..event
            })
        })
        .collect()
}

fn resolve_event(row: EventRow, counts: &HashMap<i64, i64>) -> Result<Event> {
    let id = row.id;
    let mut event = with_load_context(row.into_event(), "event")?;
    if event.participant_count.is_none() {
        event.participant_count = Some(counts.get(&id).copied().unwrap_or(0));
    }
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_pool, get_connection, setup, store, AccessMode};
    use crate::domain::Classification;
    use crate::errors::EngineError;
    use crate::records::sample_records;

    fn seeded_db(name: &str) -> (std::path::PathBuf, crate::database::DbPool) {
        let path = std::env::temp_dir().join(format!("club_calendar_{name}.db"));
        let _ = std::fs::remove_file(&path);
        let pool = create_pool(path.to_str().unwrap(), AccessMode::ReadWrite).unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::reset_database(&conn).unwrap();
        store::store_records(&mut conn, &sample_records()).unwrap();
        (path, pool)
    }

    #[test]
    fn test_load_snapshot() {
        let (path, pool) = seeded_db("load_snapshot");
        let conn = get_connection(&pool).unwrap();

        let snapshot = load_snapshot(&conn).unwrap();

        assert_eq!(snapshot.directory().len(), 7);
        assert_eq!(snapshot.events().len(), 8);
        assert_eq!(snapshot.directory().national_root(7).unwrap(), 5);

        let series_event = snapshot.event(10).unwrap();
        assert_eq!(series_event.classification, Classification::Local);
        assert_eq!(series_event.series.as_ref().map(|s| s.color.as_str()), Some("#3366FF"));
        assert_eq!(series_event.participant_count, Some(3));

        assert_eq!(snapshot.event(16).unwrap().participant_count, Some(250));
        assert_eq!(snapshot.event(12).unwrap().participant_count, Some(0));
        assert!(snapshot.event(11).unwrap().has_location());

        drop(conn);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_recent_club_events_are_newest_first() {
        let (path, pool) = seeded_db("recent_club_events");
        let conn = get_connection(&pool).unwrap();

        let events = load_recent_club_events(&conn, 2, 50).unwrap();
        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 17]);
        assert_eq!(events[0].participant_count, Some(3));

        let limited = load_recent_club_events(&conn, 2, 1).unwrap();
        assert_eq!(limited.len(), 1);

        drop(conn);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_find_by_id() {
        let (path, pool) = seeded_db("find_by_id");
        let conn = get_connection(&pool).unwrap();

        let club = clubs::find_by_id(&conn, 4).unwrap().unwrap().into_club();
        assert_eq!(club.acronym, "GVOC");
        assert_eq!(club.parent_id, Some(1));
        assert!(clubs::find_by_id(&conn, 99).unwrap().is_none());

        let event = events::find_by_id(&conn, 10).unwrap().unwrap().into_event().unwrap();
        assert_eq!(event.series.map(|s| s.name), Some("Ottawa Summer Series".to_string()));
        assert!(events::find_by_id(&conn, 99).unwrap().is_none());

        drop(conn);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unknown_classification_in_storage() {
        let (path, pool) = seeded_db("unknown_classification");
        let conn = get_connection(&pool).unwrap();
        conn.execute("UPDATE events SET event_classification_id = 9 WHERE id = 12", [])
            .unwrap();

        let err = load_snapshot(&conn).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::UnknownClassificationTier(9))
        );

        drop(conn);
        std::fs::remove_file(&path).unwrap();
    }
}
