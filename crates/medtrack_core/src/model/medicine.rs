//! Medicine domain model.
//!
//! # Responsibility
//! - Define the canonical medicine record owned by the store.
//! - Define the inbound form shape accepted by add/update.
//!
//! # Invariants
//! - `id` is unique within one collection and never reassigned.
//! - `taken_at.is_some()` iff `taken`.
//! - `updated_at >= created_at`.
//!
//! # See also
//! - `crate::store::medicine_store` for the only mutation paths.

use crate::model::time_of_day::TimeOfDay;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque, stable identifier of one medicine record.
///
/// Stored as a plain string so ids produced elsewhere (for example decimal
/// epoch-millisecond strings) survive a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicineId(String);

impl MedicineId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for MedicineId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MedicineId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MedicineId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Validated form payload for add and update.
///
/// The store trusts this input; non-empty checks belong to the form layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineFormData {
    pub name: String,
    pub dosage: String,
    pub time: TimeOfDay,
}

/// One scheduled medicine and its taken status for the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRecord {
    pub id: MedicineId,
    pub name: String,
    /// Free-form amount/unit/form, e.g. `500mg`.
    pub dosage: String,
    pub time: TimeOfDay,
    pub taken: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MedicineRecord {
    /// Creates a not-yet-taken record stamped with `now`.
    pub fn new(id: MedicineId, form: MedicineFormData, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: form.name,
            dosage: form.dosage,
            time: form.time,
            taken: false,
            taken_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the editable fields. Taken state and `created_at` are kept.
    pub fn apply_form(&mut self, form: MedicineFormData, now: DateTime<Utc>) {
        self.name = form.name;
        self.dosage = form.dosage;
        self.time = form.time;
        self.touch(now);
    }

    /// Sets the taken flag and keeps `taken_at` in lockstep with it.
    pub fn set_taken(&mut self, taken: bool, now: DateTime<Utc>) {
        self.taken = taken;
        self.taken_at = taken.then_some(now);
        self.touch(now);
    }

    /// Clears taken state without counting as a user edit.
    pub fn clear_taken(&mut self) {
        self.taken = false;
        self.taken_at = None;
    }

    /// Returns the form view of the editable fields.
    pub fn form_data(&self) -> MedicineFormData {
        MedicineFormData {
            name: self.name.clone(),
            dosage: self.dosage.clone(),
            time: self.time,
        }
    }

    // A clock stepping backwards must not break `updated_at >= created_at`.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}

/// Derived daily totals shown next to the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailySummary {
    pub total: usize,
    pub taken: usize,
    pub pending: usize,
}

impl DailySummary {
    pub fn from_records(records: &[MedicineRecord]) -> Self {
        let total = records.len();
        let taken = records.iter().filter(|record| record.taken).count();
        Self {
            total,
            taken,
            pending: total - taken,
        }
    }
}
