//! Application session tying the medicine store to its persistence slot.
//!
//! # Responsibility
//! - Load the collection once, apply the daily reset, then hand out a ready
//!   session to the UI layer.
//! - Persist the full collection after every state-changing mutation.
//!
//! # Invariants
//! - The daily reset runs exactly once, inside [`MedicineSession::open`],
//!   before any caller can read the list.
//! - Save failures are logged by the repository; in-memory state stays
//!   authoritative for the rest of the session.
//! - Load failures are logged and surfaced through
//!   [`MedicineSession::is_load_degraded`] so the UI can warn before the
//!   next save overwrites the slot.
//! - Log lines carry ids and counts only, never names or dosages.

use crate::clock::Clock;
use crate::model::medicine::{DailySummary, MedicineFormData, MedicineId, MedicineRecord};
use crate::repo::medicine_repo::MedicineRepository;
use crate::storage::KvStorage;
use crate::store::medicine_store::MedicineStore;
use log::{info, warn};
use std::time::Instant;

/// Owned session object replacing any global medicine state.
pub struct MedicineSession<S: KvStorage, C: Clock> {
    repo: MedicineRepository<S>,
    store: MedicineStore<C>,
    loading: bool,
    persisted: bool,
    load_degraded: bool,
}

impl<S: KvStorage, C: Clock> MedicineSession<S, C> {
    /// Loads persisted medicines and clears stale taken flags.
    ///
    /// Never fails: unreadable data yields an empty list.
    pub fn open(storage: S, clock: C) -> Self {
        let started_at = Instant::now();
        let repo = MedicineRepository::new(storage);
        let report = repo.load_report();
        let load_degraded = report.is_degraded();
        let mut session = Self {
            repo,
            store: MedicineStore::from_records(report.records, clock),
            loading: true,
            persisted: true,
            load_degraded,
        };

        let reset = session.store.reset_daily_status();
        if reset > 0 {
            session.persist();
        }
        session.loading = false;

        info!(
            "event=session_open module=service status={} count={} reset={} duration_ms={}",
            if load_degraded { "degraded" } else { "ok" },
            session.store.len(),
            reset,
            started_at.elapsed().as_millis()
        );
        session
    }

    /// `true` only while [`Self::open`] is still running.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the most recent save reached storage. Stays `true` until a
    /// save is attempted.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Whether persisted data was unreadable or partly dropped on open. The
    /// next save replaces whatever could not be loaded.
    pub fn is_load_degraded(&self) -> bool {
        self.load_degraded
    }

    pub fn medicines(&self) -> &[MedicineRecord] {
        self.store.list()
    }

    pub fn daily_summary(&self) -> DailySummary {
        self.store.daily_summary()
    }

    pub fn get_by_id(&self, id: &MedicineId) -> Option<&MedicineRecord> {
        self.store.get_by_id(id)
    }

    pub fn add(&mut self, form: MedicineFormData) -> MedicineRecord {
        let record = self.store.add(form);
        self.persist();
        info!("event=medicine_add module=service status=ok id={}", record.id);
        record
    }

    /// Returns `None` when `id` is unknown; nothing is saved in that case.
    pub fn update(&mut self, id: &MedicineId, form: MedicineFormData) -> Option<MedicineRecord> {
        let Some(record) = self.store.update(id, form) else {
            warn!("event=medicine_update module=service status=not_found id={id}");
            return None;
        };
        self.persist();
        info!("event=medicine_update module=service status=ok id={id}");
        Some(record)
    }

    /// Removes `id` if present. Returns whether a record was removed; a
    /// missing id is a successful no-op.
    pub fn delete(&mut self, id: &MedicineId) -> bool {
        let removed = self.store.delete(id);
        if removed {
            self.persist();
        }
        info!("event=medicine_delete module=service status=ok id={id} removed={removed}");
        removed
    }

    /// Returns `false` when `id` is unknown.
    pub fn mark_taken(&mut self, id: &MedicineId, taken: bool) -> bool {
        if !self.store.mark_taken(id, taken) {
            warn!("event=medicine_mark_taken module=service status=not_found id={id}");
            return false;
        }
        self.persist();
        info!("event=medicine_mark_taken module=service status=ok id={id} taken={taken}");
        true
    }

    fn persist(&mut self) {
        self.persisted = self.repo.save(self.store.list());
    }
}
