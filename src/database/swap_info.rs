//! Swap Info Database
//!
//! One row per composite key `(input_mint, output_mint, route_ammkeys)`.
//! The full record is stored as JSON, `cache_until` is mirrored into its own
//! indexed column so expired rows can be purged without decoding them.
//!
//! The database runs in WAL mode with one writer connection and a small set
//! of read-only connections, so reads neither queue behind a background write
//! nor behind each other.

use super::SwapInfoStore;
use crate::errors::{StoreError, SwapCacheError};
use crate::logger::{self, LogTag};
use crate::swaps::types::{SwapInfo, SwapInfoKey};
use chrono::Utc;
use parking_lot::{Mutex, MutexGuard};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const BUSY_TIMEOUT_MS: u64 = 10_000;
const READ_CONNECTIONS: usize = 4;

// =============================================================================
// DATABASE
// =============================================================================

pub struct SwapInfoDb {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    next_reader: AtomicUsize,
    path: String,
}

impl std::fmt::Debug for SwapInfoDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapInfoDb").field("path", &self.path).finish()
    }
}

impl SwapInfoDb {
    /// Open (or create) the database at `path`, creating parent directories
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SwapCacheError> {
        let path = path.as_ref();
        let path_str = path.to_string_lossy().to_string();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| open_failed(&path_str, e))?;
            }
        }

        let writer = Connection::open(path).map_err(|e| open_failed(&path_str, e))?;
        configure_connection(&writer).map_err(|e| open_failed(&path_str, e))?;
        initialize_schema(&writer).map_err(|e| open_failed(&path_str, e))?;

        // Opened after the schema exists so they never see an empty file
        let mut readers = Vec::with_capacity(READ_CONNECTIONS);
        for _ in 0..READ_CONNECTIONS {
            let reader = Connection::open(path).map_err(|e| open_failed(&path_str, e))?;
            configure_connection(&reader).map_err(|e| open_failed(&path_str, e))?;
            reader
                .pragma_update(None, "query_only", true)
                .map_err(|e| open_failed(&path_str, e))?;
            readers.push(Mutex::new(reader));
        }

        logger::info(
            LogTag::Store,
            &format!("Swap info database initialized at {}", path_str),
        );

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            next_reader: AtomicUsize::new(0),
            path: path_str,
        })
    }

    /// First idle read connection, or wait on one in round-robin order
    fn reader(&self) -> MutexGuard<'_, Connection> {
        for conn in &self.readers {
            if let Some(guard) = conn.try_lock() {
                return guard;
            }
        }
        let index = self.next_reader.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        self.readers[index].lock()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Point read; `Ok(None)` when no row exists for the key.
    ///
    /// Expiry is not applied here, callers decide what a stale record means.
    pub fn get(&self, key: &SwapInfoKey) -> Result<Option<SwapInfo>, SwapCacheError> {
        let ammkeys = encode_ammkeys(&key.route_ammkeys)?;
        let conn = self.reader();

        let record: Option<String> = conn
            .query_row(
                "SELECT record FROM swap_info
                 WHERE input_mint = ?1 AND output_mint = ?2 AND route_ammkeys = ?3",
                params![key.input_mint, key.output_mint, ammkeys],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| SwapCacheError::store_error("get", e))?;

        record.map(|json| decode_record(&json)).transpose()
    }

    /// Batched read; slot `i` of the result answers `keys[i]`
    pub fn get_many(&self, keys: &[SwapInfoKey]) -> Result<Vec<Option<SwapInfo>>, SwapCacheError> {
        let conn = self.reader();
        let mut stmt = conn
            .prepare_cached(
                "SELECT record FROM swap_info
                 WHERE input_mint = ?1 AND output_mint = ?2 AND route_ammkeys = ?3",
            )
            .map_err(|e| SwapCacheError::store_error("get_many", e))?;

        let mut results = Vec::with_capacity(keys.len());
        for key in keys {
            let ammkeys = encode_ammkeys(&key.route_ammkeys)?;
            let record: Option<String> = stmt
                .query_row(params![key.input_mint, key.output_mint, ammkeys], |row| {
                    row.get(0)
                })
                .optional()
                .map_err(|e| SwapCacheError::store_error("get_many", e))?;
            results.push(record.map(|json| decode_record(&json)).transpose()?);
        }

        Ok(results)
    }

    /// Insert or replace the record stored under its key
    pub fn put(&self, info: &SwapInfo) -> Result<bool, SwapCacheError> {
        let key = info.key();
        let ammkeys = encode_ammkeys(&key.route_ammkeys)?;
        let record = serde_json::to_string(info)?;
        let now = Utc::now().to_rfc3339();

        let conn = self.writer.lock();
        conn.execute(
            "INSERT OR REPLACE INTO swap_info
                (input_mint, output_mint, route_ammkeys, record, cache_until, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                key.input_mint,
                key.output_mint,
                ammkeys,
                record,
                info.cache_until,
                now
            ],
        )
        .map_err(|e| SwapCacheError::store_error("put", e))?;

        logger::debug(
            LogTag::Store,
            &format!(
                "Stored swap info {} -> {} via [{}] (cache_until={:?})",
                key.input_mint,
                key.output_mint,
                key.route_ammkeys.join(", "),
                info.cache_until
            ),
        );

        Ok(true)
    }

    /// Delete the record stored under `info`'s key; true iff a row existed
    pub fn remove(&self, info: &SwapInfo) -> Result<bool, SwapCacheError> {
        self.remove_key(&info.key())
    }

    pub fn remove_key(&self, key: &SwapInfoKey) -> Result<bool, SwapCacheError> {
        let ammkeys = encode_ammkeys(&key.route_ammkeys)?;
        let conn = self.writer.lock();
        let changes = conn
            .execute(
                "DELETE FROM swap_info
                 WHERE input_mint = ?1 AND output_mint = ?2 AND route_ammkeys = ?3",
                params![key.input_mint, key.output_mint, ammkeys],
            )
            .map_err(|e| SwapCacheError::store_error("remove", e))?;

        Ok(changes > 0)
    }

    /// Delete every row whose `cache_until` is before `now_ms`; returns the count
    pub fn purge_expired(&self, now_ms: i64) -> Result<usize, SwapCacheError> {
        let conn = self.writer.lock();
        let deleted = conn
            .execute(
                "DELETE FROM swap_info WHERE cache_until IS NOT NULL AND cache_until < ?1",
                params![now_ms],
            )
            .map_err(|e| SwapCacheError::store_error("purge_expired", e))?;

        if deleted > 0 {
            logger::info(
                LogTag::Store,
                &format!("Purged {} expired swap info records", deleted),
            );
        }

        Ok(deleted)
    }

    pub fn count(&self) -> Result<u64, SwapCacheError> {
        let conn = self.reader();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM swap_info", [], |row| row.get(0))
            .map_err(|e| SwapCacheError::store_error("count", e))?;
        Ok(count.max(0) as u64)
    }

    /// Rows carrying an expiry, expired or not
    pub fn count_temporary(&self) -> Result<u64, SwapCacheError> {
        let conn = self.reader();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM swap_info WHERE cache_until IS NOT NULL",
                [],
                |row| row.get(0),
            )
            .map_err(|e| SwapCacheError::store_error("count_temporary", e))?;
        Ok(count.max(0) as u64)
    }
}

impl SwapInfoStore for SwapInfoDb {
    fn get(&self, key: &SwapInfoKey) -> Result<Option<SwapInfo>, SwapCacheError> {
        SwapInfoDb::get(self, key)
    }

    fn get_many(&self, keys: &[SwapInfoKey]) -> Result<Vec<Option<SwapInfo>>, SwapCacheError> {
        SwapInfoDb::get_many(self, keys)
    }

    fn put(&self, info: &SwapInfo) -> Result<bool, SwapCacheError> {
        SwapInfoDb::put(self, info)
    }

    fn remove(&self, info: &SwapInfo) -> Result<bool, SwapCacheError> {
        SwapInfoDb::remove(self, info)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
    Ok(())
}

fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS swap_info (
            input_mint TEXT NOT NULL,
            output_mint TEXT NOT NULL,
            route_ammkeys TEXT NOT NULL,
            record TEXT NOT NULL,
            cache_until INTEGER,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (input_mint, output_mint, route_ammkeys)
        ) WITHOUT ROWID
        "#,
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_swap_info_cache_until ON swap_info(cache_until)
         WHERE cache_until IS NOT NULL",
        [],
    )?;

    Ok(())
}

/// Ordered hop addresses as a JSON array; order is part of the key
fn encode_ammkeys(route_ammkeys: &[String]) -> Result<String, SwapCacheError> {
    Ok(serde_json::to_string(route_ammkeys)?)
}

fn decode_record(json: &str) -> Result<SwapInfo, SwapCacheError> {
    serde_json::from_str(json).map_err(|e| {
        SwapCacheError::Store(StoreError::Serialization {
            error: format!("corrupt swap info record: {}", e),
        })
    })
}

fn open_failed(path: &str, error: impl std::fmt::Display) -> SwapCacheError {
    SwapCacheError::Store(StoreError::OpenFailed {
        path: path.to_string(),
        error: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, SwapInfoDb) {
        let dir = tempfile::tempdir().unwrap();
        let db = SwapInfoDb::open(dir.path().join("nested").join("swap_info.db")).unwrap();
        (dir, db)
    }

    fn record(ammkeys: &[&str], cache_until: Option<i64>) -> SwapInfo {
        SwapInfo {
            direct: true,
            input_mint: "A".to_string(),
            output_mint: "B".to_string(),
            remaining_accounts: vec![],
            route_labels: vec!["Orca".to_string(); ammkeys.len()],
            route_ammkeys: ammkeys.iter().map(|k| k.to_string()).collect(),
            route_mints: vec!["A".to_string(), "B".to_string()],
            decoded_route_plan: vec![],
            address_lookup_table_addresses: vec!["LUT".to_string()],
            cache_until,
        }
    }

    #[test]
    fn test_put_then_get_returns_same_record() {
        let (_dir, db) = open_temp();
        let info = record(&["P1"], None);

        assert!(db.put(&info).unwrap());
        assert_eq!(db.get(&info.key()).unwrap(), Some(info));
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn test_put_replaces_existing_row() {
        let (_dir, db) = open_temp();
        db.put(&record(&["P1"], None)).unwrap();
        let newer = record(&["P1"], Some(42));
        db.put(&newer).unwrap();

        assert_eq!(db.count().unwrap(), 1);
        assert_eq!(db.get(&newer.key()).unwrap().unwrap().cache_until, Some(42));
    }

    #[test]
    fn test_remove_then_get_is_absent() {
        let (_dir, db) = open_temp();
        let info = record(&["P1"], None);
        db.put(&info).unwrap();

        assert!(db.remove(&info).unwrap());
        assert_eq!(db.get(&info.key()).unwrap(), None);
        assert!(!db.remove(&info).unwrap());
    }

    #[test]
    fn test_hop_order_addresses_different_rows() {
        let (_dir, db) = open_temp();
        let forward = record(&["P1", "P2"], None);
        db.put(&forward).unwrap();

        let swapped = SwapInfoKey::new("A", "B", vec!["P2".to_string(), "P1".to_string()]);
        assert_eq!(db.get(&swapped).unwrap(), None);
        assert!(db.get(&forward.key()).unwrap().is_some());
    }

    #[test]
    fn test_get_many_preserves_input_order() {
        let (_dir, db) = open_temp();
        let first = record(&["P1"], None);
        let third = record(&["P3"], Some(7));
        db.put(&first).unwrap();
        db.put(&third).unwrap();

        let missing = SwapInfoKey::new("A", "B", vec!["P2".to_string()]);
        let results = db
            .get_many(&[third.key(), missing, first.key()])
            .unwrap();

        assert_eq!(results, vec![Some(third), None, Some(first)]);
        assert!(db.get_many(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_purge_expired_keeps_permanent_and_fresh_rows() {
        let (_dir, db) = open_temp();
        db.put(&record(&["P1"], None)).unwrap();
        db.put(&record(&["P2"], Some(1_000))).unwrap();
        db.put(&record(&["P3"], Some(5_000))).unwrap();

        assert_eq!(db.count_temporary().unwrap(), 2);
        assert_eq!(db.purge_expired(2_000).unwrap(), 1);
        assert_eq!(db.count().unwrap(), 2);
        assert!(db.get(&record(&["P2"], None).key()).unwrap().is_none());
    }

    #[test]
    fn test_busy_reader_does_not_block_other_reads() {
        let (_dir, db) = open_temp();
        let info = record(&["P1"], None);
        db.put(&info).unwrap();

        let held: Vec<_> = db.readers[..READ_CONNECTIONS - 1]
            .iter()
            .map(|conn| conn.lock())
            .collect();
        assert_eq!(db.get(&info.key()).unwrap(), Some(info.clone()));
        assert_eq!(db.get_many(&[info.key()]).unwrap(), vec![Some(info)]);
        drop(held);
    }

    #[test]
    fn test_reads_run_concurrently_from_threads() {
        let (_dir, db) = open_temp();
        let info = record(&["P1"], None);
        db.put(&info).unwrap();
        let db = std::sync::Arc::new(db);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let db = db.clone();
                let key = info.key();
                std::thread::spawn(move || db.get(&key).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(info.clone()));
        }
    }

    #[test]
    fn test_corrupt_row_is_an_error_not_absence() {
        let (_dir, db) = open_temp();
        let info = record(&["P1"], None);
        db.put(&info).unwrap();
        db.writer
            .lock()
            .execute("UPDATE swap_info SET record = 'not json'", [])
            .unwrap();

        let err = db.get(&info.key()).unwrap_err();
        assert!(err.is_store());
        assert!(db.get_many(&[info.key()]).unwrap_err().is_store());
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swap_info.db");
        let info = record(&["P1"], None);
        {
            let db = SwapInfoDb::open(&path).unwrap();
            db.put(&info).unwrap();
        }
        let db = SwapInfoDb::open(&path).unwrap();
        assert_eq!(db.get(&info.key()).unwrap(), Some(info));
    }
}
