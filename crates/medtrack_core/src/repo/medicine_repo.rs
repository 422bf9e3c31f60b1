//! Persistence adapter between the in-memory medicine list and one storage slot.
//!
//! # Responsibility
//! - Serialize the full collection to JSON under a fixed key.
//! - Rebuild records, including RFC 3339 timestamps, on load.
//!
//! # Invariants
//! - `load`/`save` never propagate failures; they log and degrade.
//! - One undecodable entry drops only that entry, never the whole list.
//! - A failed save leaves the previously persisted value untouched.
//! - Loaded collections have unique ids and `taken_at` only when `taken`.

use crate::model::medicine::{MedicineId, MedicineRecord};
use crate::storage::{KvStorage, StorageError};
use log::{debug, error, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Storage slot holding the serialized medicine list.
pub const MEDICINES_STORAGE_KEY: &str = "medicines-app-data";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    /// Persisted value is not a valid medicine list.
    Decode(serde_json::Error),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "invalid persisted medicine data: {err}"),
            Self::Encode(err) => write!(f, "failed to encode medicine data: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Result of reading the persisted list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub records: Vec<MedicineRecord>,
    /// Entries skipped because they did not decode or repeated an id.
    pub dropped: usize,
    /// The slot could not be read or did not hold a JSON list.
    pub failed: bool,
}

impl LoadReport {
    /// Whether anything persisted was lost while loading.
    pub fn is_degraded(&self) -> bool {
        self.failed || self.dropped > 0
    }
}

/// Loads and saves the whole medicine list through a [`KvStorage`].
pub struct MedicineRepository<S: KvStorage> {
    storage: S,
}

impl<S: KvStorage> MedicineRepository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted list; a missing slot is an empty list.
    ///
    /// Entries that fail to decode are skipped; see [`Self::try_load_report`].
    pub fn try_load(&self) -> RepoResult<Vec<MedicineRecord>> {
        self.try_load_report().map(|report| report.records)
    }

    /// Reads the persisted list and reports how many entries were skipped.
    ///
    /// Only a value that is not a JSON list at all is a [`RepoError::Decode`];
    /// individual bad entries are dropped with a warning.
    pub fn try_load_report(&self) -> RepoResult<LoadReport> {
        let Some(raw) = self.storage.get(MEDICINES_STORAGE_KEY)? else {
            return Ok(LoadReport::default());
        };
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(RepoError::Decode)?;
        Ok(sanitize_loaded(entries))
    }

    /// Like [`Self::try_load`], but degrades to an empty list on any failure.
    pub fn load(&self) -> Vec<MedicineRecord> {
        self.load_report().records
    }

    /// Like [`Self::try_load_report`], but degrades to an empty, failed
    /// report instead of returning an error.
    pub fn load_report(&self) -> LoadReport {
        let started_at = Instant::now();
        match self.try_load_report() {
            Ok(report) => {
                debug!(
                    "event=medicines_load module=repo status=ok count={} dropped={} duration_ms={}",
                    report.records.len(),
                    report.dropped,
                    started_at.elapsed().as_millis()
                );
                report
            }
            Err(err) => {
                error!(
                    "event=medicines_load module=repo status=error fallback=empty error={}",
                    err
                );
                LoadReport {
                    failed: true,
                    ..LoadReport::default()
                }
            }
        }
    }

    /// Overwrites the slot with the full serialized list.
    pub fn try_save(&self, records: &[MedicineRecord]) -> RepoResult<()> {
        let encoded = serde_json::to_string(records).map_err(RepoError::Encode)?;
        self.storage.set(MEDICINES_STORAGE_KEY, &encoded)?;
        Ok(())
    }

    /// Like [`Self::try_save`], but logs failures. Returns whether the write landed.
    pub fn save(&self, records: &[MedicineRecord]) -> bool {
        let started_at = Instant::now();
        match self.try_save(records) {
            Ok(()) => {
                debug!(
                    "event=medicines_save module=repo status=ok count={} duration_ms={}",
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=medicines_save module=repo status=error count={} error={}",
                    records.len(),
                    err
                );
                false
            }
        }
    }
}

fn sanitize_loaded(entries: Vec<serde_json::Value>) -> LoadReport {
    let mut seen: HashSet<MedicineId> = HashSet::with_capacity(entries.len());
    let mut report = LoadReport {
        records: Vec::with_capacity(entries.len()),
        ..LoadReport::default()
    };

    for (index, entry) in entries.into_iter().enumerate() {
        let mut record = match serde_json::from_value::<MedicineRecord>(entry) {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    "event=medicines_load module=repo status=dropped reason=invalid_record index={index} error={err}"
                );
                report.dropped += 1;
                continue;
            }
        };
        if !seen.insert(record.id.clone()) {
            warn!(
                "event=medicines_load module=repo status=dropped reason=duplicate_id id={}",
                record.id
            );
            report.dropped += 1;
            continue;
        }
        if !record.taken && record.taken_at.is_some() {
            warn!(
                "event=medicines_load module=repo status=repaired reason=stale_taken_at id={}",
                record.id
            );
            record.taken_at = None;
        }
        if record.updated_at < record.created_at {
            record.updated_at = record.created_at;
        }
        report.records.push(record);
    }

    report
}
