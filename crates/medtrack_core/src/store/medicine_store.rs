//! Medicine store: the ordered list plus its only mutation surface.
//!
//! # Responsibility
//! - Own the record collection in insertion (display) order.
//! - Stamp create/update/taken timestamps from the injected clock.
//! - Correct stale taken flags left over from a previous day.
//!
//! # Invariants
//! - Ids are unique; `add` regenerates on the (unlikely) collision.
//! - `taken_at.is_some()` iff `taken` after every operation.
//! - The store never persists; callers decide when to save.

use crate::clock::Clock;
use crate::model::medicine::{DailySummary, MedicineFormData, MedicineId, MedicineRecord};

pub struct MedicineStore<C: Clock> {
    records: Vec<MedicineRecord>,
    clock: C,
}

impl<C: Clock> MedicineStore<C> {
    pub fn new(clock: C) -> Self {
        Self::from_records(Vec::new(), clock)
    }

    /// Wraps an already loaded collection, keeping its order.
    pub fn from_records(records: Vec<MedicineRecord>, clock: C) -> Self {
        Self { records, clock }
    }

    /// Full collection in display order.
    pub fn list(&self) -> &[MedicineRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a new, not-yet-taken record and returns it.
    pub fn add(&mut self, form: MedicineFormData) -> MedicineRecord {
        let mut id = MedicineId::generate();
        while self.position(&id).is_some() {
            id = MedicineId::generate();
        }

        let record = MedicineRecord::new(id, form, self.clock.now_utc());
        self.records.push(record.clone());
        record
    }

    /// Replaces name/dosage/time. Returns `None` when `id` is unknown.
    pub fn update(&mut self, id: &MedicineId, form: MedicineFormData) -> Option<MedicineRecord> {
        let now = self.clock.now_utc();
        let record = self.get_mut(id)?;
        record.apply_form(form, now);
        Some(record.clone())
    }

    /// Removes the record if present. Returns whether anything was removed;
    /// a missing id is not an error.
    pub fn delete(&mut self, id: &MedicineId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Sets the taken flag. Returns `false` when `id` is unknown.
    pub fn mark_taken(&mut self, id: &MedicineId, taken: bool) -> bool {
        let now = self.clock.now_utc();
        match self.get_mut(id) {
            Some(record) => {
                record.set_taken(taken, now);
                true
            }
            None => false,
        }
    }

    pub fn get_by_id(&self, id: &MedicineId) -> Option<&MedicineRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Clears taken flags whose `taken_at` is not on today's local date.
    ///
    /// Date granularity only: a dose taken earlier today stays taken. A
    /// taken record without `taken_at` counts as stale. Returns the number
    /// of records reset.
    pub fn reset_daily_status(&mut self) -> usize {
        let today = self.clock.today();
        let clock = &self.clock;
        let mut reset = 0;

        for record in self.records.iter_mut().filter(|record| record.taken) {
            let taken_today = record
                .taken_at
                .is_some_and(|taken_at| clock.local_date_of(taken_at) == today);
            if !taken_today {
                record.clear_taken();
                reset += 1;
            }
        }

        reset
    }

    pub fn daily_summary(&self) -> DailySummary {
        DailySummary::from_records(&self.records)
    }

    fn position(&self, id: &MedicineId) -> Option<usize> {
        self.records.iter().position(|record| &record.id == id)
    }

    fn get_mut(&mut self, id: &MedicineId) -> Option<&mut MedicineRecord> {
        self.records.iter_mut().find(|record| &record.id == id)
    }
}
