//! SQLite record store for completed training sessions.
//!
//! Schema:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS training_records (
//!     id          INTEGER PRIMARY KEY AUTOINCREMENT,
//!     device_id   TEXT NOT NULL,
//!     module_type TEXT NOT NULL,
//!     score       INTEGER NOT NULL,
//!     accuracy    REAL NOT NULL,
//!     duration    REAL NOT NULL,
//!     difficulty  INTEGER NOT NULL,
//!     details     TEXT,
//!     created_at  TEXT NOT NULL
//! );
//! ```
//!
//! `id` and `created_at` are assigned by the store on insert. `details` is a
//! JSON object in a TEXT column, keeping the schema stable as modules add
//! sub-metrics. WAL mode allows reads while a result is being written.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags};
use tracing::{debug, info, warn};

use crate::config::StorageConfig;
use crate::error::{Result, TrainError};
use crate::record::{NewRecord, TrainingRecord};
use crate::types::ModuleKind;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS training_records (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    device_id   TEXT NOT NULL,
    module_type TEXT NOT NULL,
    score       INTEGER NOT NULL,
    accuracy    REAL NOT NULL,
    duration    REAL NOT NULL,
    difficulty  INTEGER NOT NULL,
    details     TEXT,
    created_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_records_device ON training_records(device_id);
CREATE INDEX IF NOT EXISTS idx_records_module ON training_records(module_type);";

/// Filter for [`RecordStore::query`]. Empty filter returns everything,
/// newest first.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Only records from this device.
    pub device_id: Option<String>,
    /// Only records from this module.
    pub module: Option<ModuleKind>,
    /// At most this many rows.
    pub limit: Option<usize>,
}

/// Handle to an open SQLite database of training records.
pub struct RecordStore {
    conn: Connection,
    db_path: PathBuf,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Open (or create) the database at `path`.
    ///
    /// The schema is created if missing; WAL mode is enabled when
    /// `config.wal_mode` is true.
    ///
    /// # Errors
    /// Returns [`TrainError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, config: &StorageConfig) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&db_path, flags)?;

        if config.wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(path = %db_path.display(), wal = config.wal_mode, "Record store opened");
        Ok(Self { conn, db_path })
    }

    /// Open an in-memory database (tests).
    ///
    /// # Errors
    /// Returns [`TrainError::Database`] on SQLite failures.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Insert one record. The store assigns `id` and `created_at` and
    /// returns the stored row.
    ///
    /// # Errors
    /// Returns [`TrainError::Serialization`] if the details map cannot be
    /// encoded, or [`TrainError::Database`] on SQLite failures.
    pub fn insert(&self, record: &NewRecord) -> Result<TrainingRecord> {
        let details_json = match &record.details {
            Some(map) => Some(
                serde_json::to_string(map)
                    .map_err(|e| TrainError::Serialization(e.to_string()))?,
            ),
            None => None,
        };
        let created_at = Utc::now();

        self.conn.execute(
            "INSERT INTO training_records
                (device_id, module_type, score, accuracy, duration, difficulty, details, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.device_id,
                record.module_type.as_str(),
                record.score,
                record.accuracy,
                record.duration,
                record.difficulty,
                details_json,
                created_at.to_rfc3339(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        debug!(
            id,
            module = %record.module_type,
            score = record.score,
            "Training record stored"
        );

        Ok(TrainingRecord {
            id,
            device_id: record.device_id.clone(),
            module_type: record.module_type,
            score: record.score,
            accuracy: record.accuracy,
            duration: record.duration,
            difficulty: record.difficulty,
            details: record.details.clone(),
            created_at,
        })
    }

    /// Query stored records, newest first.
    ///
    /// # Errors
    /// Returns [`TrainError::Database`] on SQLite failures.
    pub fn query(&self, filter: &RecordFilter) -> Result<Vec<TrainingRecord>> {
        let mut sql = String::from(
            "SELECT id, device_id, module_type, score, accuracy, duration, difficulty, details, created_at
             FROM training_records WHERE 1=1",
        );
        let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
        if let Some(device) = &filter.device_id {
            sql.push_str(" AND device_id = ?");
            params_vec.push(Box::new(device.clone()));
        }
        if let Some(module) = filter.module {
            sql.push_str(" AND module_type = ?");
            params_vec.push(Box::new(module.as_str().to_string()));
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            params_vec.push(Box::new(limit as i64));
        }

        let mut stmt = self.conn.prepare_cached(&sql)?;
        let param_refs: Vec<&dyn rusqlite::types::ToSql> =
            params_vec.iter().map(AsRef::as_ref).collect();
        let rows = stmt.query_map(param_refs.as_slice(), row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            match row? {
                Ok(record) => records.push(record),
                Err(e) => warn!(error = %e, "Skipping malformed record row"),
            }
        }
        Ok(records)
    }

    /// Total number of stored records.
    ///
    /// # Errors
    /// Returns [`TrainError::Database`] on SQLite failures.
    pub fn count(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM training_records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Back up the database to `dest_path` with SQLite's online-backup API.
    /// Safe to call while the store is in use.
    ///
    /// # Errors
    /// Returns [`TrainError::Database`] on SQLite failures.
    pub fn backup<P: AsRef<Path>>(&self, dest_path: P) -> Result<()> {
        let mut dest = Connection::open(dest_path.as_ref())?;
        let backup = rusqlite::backup::Backup::new(&self.conn, &mut dest)?;
        backup.run_to_completion(256, std::time::Duration::from_millis(50), None)?;
        info!(dest = %dest_path.as_ref().display(), "Record store backup completed");
        Ok(())
    }

    /// Path to the database file (`:memory:` for in-memory stores).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Decode one row. Inner result carries decode failures for individual rows
/// so one bad row doesn't poison a whole query.
fn row_to_record(
    row: &rusqlite::Row<'_>,
) -> rusqlite::Result<std::result::Result<TrainingRecord, String>> {
    let module_str: String = row.get(2)?;
    let details_json: Option<String> = row.get(7)?;
    let created_str: String = row.get(8)?;

    let module_type: ModuleKind = match module_str.parse() {
        Ok(kind) => kind,
        Err(e) => return Ok(Err(e)),
    };
    let details = match details_json {
        Some(json) => match serde_json::from_str(&json) {
            Ok(map) => Some(map),
            Err(e) => return Ok(Err(e.to_string())),
        },
        None => None,
    };
    let created_at = match DateTime::parse_from_rfc3339(&created_str) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => return Ok(Err(e.to_string())),
    };

    Ok(Ok(TrainingRecord {
        id: row.get(0)?,
        device_id: row.get(1)?,
        module_type,
        score: row.get(3)?,
        accuracy: row.get(4)?,
        duration: row.get(5)?,
        difficulty: row.get(6)?,
        details,
        created_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(device: &str, module: ModuleKind) -> NewRecord {
        let mut details = serde_json::Map::new();
        details.insert("mis_taps".into(), 2.into());
        NewRecord {
            device_id: device.to_string(),
            module_type: module,
            score: 280,
            accuracy: 0.875,
            duration: 44.2,
            difficulty: 4,
            details: Some(details),
        }
    }

    #[test]
    fn insert_assigns_id_and_timestamp() {
        let store = RecordStore::open_in_memory().expect("open");
        let stored = store
            .insert(&sample_record("dev-a", ModuleKind::GridSearch))
            .expect("insert");
        assert!(stored.id >= 1);
        assert_eq!(stored.module_type, ModuleKind::GridSearch);
    }

    #[test]
    fn round_trip_preserves_fields() {
        let store = RecordStore::open_in_memory().expect("open");
        store
            .insert(&sample_record("dev-a", ModuleKind::GridSearch))
            .expect("insert");

        let records = store.query(&RecordFilter::default()).expect("query");
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.device_id, "dev-a");
        assert_eq!(r.score, 280);
        assert!((r.accuracy - 0.875).abs() < 1e-9);
        assert_eq!(r.details.as_ref().expect("details")["mis_taps"], 2);
    }

    #[test]
    fn query_filters_by_device_and_module() {
        let store = RecordStore::open_in_memory().expect("open");
        store
            .insert(&sample_record("dev-a", ModuleKind::GridSearch))
            .expect("insert");
        store
            .insert(&sample_record("dev-a", ModuleKind::SimonRepeat))
            .expect("insert");
        store
            .insert(&sample_record("dev-b", ModuleKind::GridSearch))
            .expect("insert");

        let by_device = store
            .query(&RecordFilter {
                device_id: Some("dev-a".into()),
                ..RecordFilter::default()
            })
            .expect("query");
        assert_eq!(by_device.len(), 2);

        let by_module = store
            .query(&RecordFilter {
                module: Some(ModuleKind::GridSearch),
                ..RecordFilter::default()
            })
            .expect("query");
        assert_eq!(by_module.len(), 2);
    }

    #[test]
    fn query_limit_caps_rows() {
        let store = RecordStore::open_in_memory().expect("open");
        for _ in 0..5 {
            store
                .insert(&sample_record("dev-a", ModuleKind::SceneMemory))
                .expect("insert");
        }
        let limited = store
            .query(&RecordFilter {
                limit: Some(3),
                ..RecordFilter::default()
            })
            .expect("query");
        assert_eq!(limited.len(), 3);
        assert_eq!(store.count().expect("count"), 5);
    }

    #[test]
    fn file_backed_store_and_backup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("records.db");
        let store = RecordStore::open(&db_path, &StorageConfig::default()).expect("open");
        store
            .insert(&sample_record("dev-a", ModuleKind::SoundMatch))
            .expect("insert");

        let backup_path = dir.path().join("records_backup.db");
        store.backup(&backup_path).expect("backup");

        let restored = RecordStore::open(&backup_path, &StorageConfig::default()).expect("open backup");
        assert_eq!(restored.count().expect("count"), 1);
    }
}
