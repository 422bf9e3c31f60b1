//! Core domain logic for medtrack.
//! This crate is the single source of truth for medicine-list invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ConfigOverrides, MedtrackConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::medicine::{DailySummary, MedicineFormData, MedicineId, MedicineRecord};
pub use model::time_of_day::{TimeOfDay, TimeOfDayParseError};
pub use repo::medicine_repo::{
    LoadReport, MedicineRepository, RepoError, RepoResult, MEDICINES_STORAGE_KEY,
};
pub use service::medicine_session::MedicineSession;
pub use storage::{KvStorage, MemoryKvStorage, SqliteKvStorage, StorageError, StorageResult};
pub use store::medicine_store::MedicineStore;
