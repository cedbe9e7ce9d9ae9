use parking_lot::RwLock;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::models::bill::{Bill, StoredBill};

/// File-backed store for billing records
///
/// Records live in a single JSON document, most recent first. Every
/// mutation is persisted before it returns.
pub struct BillStore {
    data_dir: PathBuf,
    file_path: PathBuf,
    records: RwLock<Vec<StoredBill>>,
}

impl BillStore {
    /// Open a store under the given data directory
    ///
    /// Creates the directory if needed; a missing records file means an
    /// empty store.
    pub fn open(data_dir: PathBuf) -> Result<Self, String> {
        fs::create_dir_all(&data_dir)
            .map_err(|e| format!("Failed to create data directory: {}", e))?;

        let file_path = data_dir.join("bills.json");
        let records = load_records(&file_path)?;
        info!("Bill store opened with {} records at {:?}", records.len(), file_path);

        Ok(Self {
            data_dir,
            file_path,
            records: RwLock::new(records),
        })
    }

    /// Persist a new bill and return the stored record with its id
    pub fn create(&self, bill: Bill) -> Result<StoredBill, String> {
        let mut records = self.records.write();

        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let stored = StoredBill {
            id,
            created_at: chrono::Utc::now().timestamp_millis(),
            bill,
        };

        // Most recent first
        records.insert(0, stored.clone());
        save_records(&self.file_path, &records)?;

        Ok(stored)
    }

    /// Return clones of at most `limit` records, newest first
    pub fn list(&self, limit: usize) -> Vec<StoredBill> {
        let records = self.records.read();
        records.iter().take(limit).cloned().collect()
    }

    /// Number of records currently held
    pub fn count(&self) -> usize {
        self.records.read().len()
    }

    /// Path of the backing JSON document
    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }

    /// Directory the store writes into
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }
}

fn load_records(file_path: &PathBuf) -> Result<Vec<StoredBill>, String> {
    if !file_path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(file_path)
        .map_err(|e| format!("Failed to read bills file: {}", e))?;

    let records: Vec<StoredBill> =
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse bills file: {}", e))?;

    Ok(records)
}

fn save_records(file_path: &PathBuf, records: &[StoredBill]) -> Result<(), String> {
    let content = serde_json::to_string_pretty(records)
        .map_err(|e| format!("Failed to serialize bills: {}", e))?;

    fs::write(file_path, content).map_err(|e| format!("Failed to write bills file: {}", e))?;

    Ok(())
}
