use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::config::AppConfig;
use crate::database::{self, setup, store, AccessMode};
use crate::records::RecordSet;

/// Replaces the calendar database with the contents of a record export
pub struct ImportService {
    config: AppConfig,
}

impl ImportService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, source: &Path) -> Result<()> {
        let db_path = &self.config.database_path;
        let temp_db_path = format!("{}.tmp", db_path);

        info!("=== Starting Record Import (Atomic) ===\n");
        info!("Source: {}, Target DB: {}, Temp DB: {}", source.display(), db_path, temp_db_path);

        let records = RecordSet::load(source)?;

        // Reject exports the engine could not serve before touching any file
        let snapshot = records
            .to_snapshot()
            .with_context(|| format!("Records in {} are inconsistent", source.display()))?;
        info!(
            "  → Validated {} clubs and {} events\n",
            snapshot.directory().len(),
            snapshot.events().len()
        );

        if Path::new(&temp_db_path).exists() {
            std::fs::remove_file(&temp_db_path)?;
        }

        self.import_to_db(&temp_db_path, &records)?;

        std::fs::rename(&temp_db_path, db_path)
            .with_context(|| format!("Failed to move {} into place", temp_db_path))?;
        info!("Successfully swapped database to {}", db_path);

        info!("=== Import Complete ===");
        Ok(())
    }

    fn import_to_db(&self, db_path: &str, records: &RecordSet) -> Result<()> {
        let pool = database::create_pool(db_path, AccessMode::ReadWrite)?;
        let mut conn = database::get_connection(&pool)?;

        setup::reset_database(&conn)?;
        info!("  → Database schema reset\n");

        store::store_records(&mut conn, records)
    }
}
