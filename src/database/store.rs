use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;

use super::{clubs, events, results, series};
use crate::domain::Classification;
use crate::errors::with_import_context;
use crate::records::RecordSet;

/// Writes a full record set in one transaction
pub fn store_records(conn: &mut Connection, records: &RecordSet) -> Result<()> {
    let tx = conn.transaction().context("Failed to start import transaction")?;
    // Clubs may reference parents that appear later in the file
    tx.execute_batch("PRAGMA defer_foreign_keys = ON;")?;

    for club in &records.clubs {
        clubs::insert_club(&tx, club).with_context(|| format!("Club {}", club.id))?;
    }
    info!("  → Stored {} clubs", records.clubs.len());

    for item in &records.series {
        series::insert_series(&tx, item).with_context(|| format!("Series {}", item.id))?;
    }

    for event in &records.events {
        let tier = Classification::from_id(event.event_classification_id);
        with_import_context(tier, "event", event.id)?;
        events::insert_event(&tx, event).with_context(|| format!("Event {}", event.id))?;
    }
    info!("  → Stored {} events", records.events.len());

    for course in &records.courses {
        results::insert_course(&tx, course).with_context(|| format!("Course {}", course.id))?;
    }

    for result in &records.results {
        results::insert_result(&tx, result).with_context(|| format!("Result {}", result.id))?;
    }
    info!("  → Stored {} results", records.results.len());

    tx.commit().context("Failed to commit import")?;
    Ok(())
}
