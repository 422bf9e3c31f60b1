use chrono::{FixedOffset, TimeDelta, TimeZone};
use medtrack_core::db::open_db_in_memory;
use medtrack_core::{
    FixedClock, KvStorage, MedicineFormData, MedicineId, MedicineRepository, MedicineSession,
    MemoryKvStorage, SqliteKvStorage, StorageError, StorageResult, MEDICINES_STORAGE_KEY,
};
use std::cell::Cell;

fn clock() -> FixedClock {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    FixedClock::new(offset.with_ymd_and_hms(2026, 9, 1, 8, 0, 0).unwrap())
}

fn form(name: &str, dosage: &str, time: &str) -> MedicineFormData {
    MedicineFormData {
        name: name.to_string(),
        dosage: dosage.to_string(),
        time: time.parse().unwrap(),
    }
}

/// Counts writes so tests can assert when a save happened.
#[derive(Default)]
struct CountingStorage {
    inner: MemoryKvStorage,
    writes: Cell<usize>,
    read_only: Cell<bool>,
}

impl KvStorage for CountingStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.read_only.get() {
            return Err(StorageError::Unavailable("read-only volume".to_string()));
        }
        self.writes.set(self.writes.get() + 1);
        self.inner.set(key, value)
    }
}

#[test]
fn first_run_opens_empty_and_ready() {
    let storage = CountingStorage::default();
    let session = MedicineSession::open(&storage, clock());

    assert!(!session.is_loading());
    assert!(!session.is_load_degraded());
    assert!(session.medicines().is_empty());
    assert_eq!(session.daily_summary().total, 0);
    assert_eq!(storage.writes.get(), 0);
}

#[test]
fn every_state_change_is_saved() {
    let storage = CountingStorage::default();
    let clock = clock();
    let mut session = MedicineSession::open(&storage, &clock);

    let record = session.add(form("Paracetamol", "500mg", "08:00"));
    assert_eq!(storage.writes.get(), 1);

    assert!(session.mark_taken(&record.id, true));
    assert_eq!(storage.writes.get(), 2);

    session
        .update(&record.id, form("Paracetamol", "750mg", "08:00"))
        .unwrap();
    assert_eq!(storage.writes.get(), 3);

    let persisted = MedicineRepository::new(&storage).try_load().unwrap();
    assert_eq!(persisted, session.medicines());

    assert!(session.delete(&record.id));
    assert_eq!(storage.writes.get(), 4);
    assert!(MedicineRepository::new(&storage)
        .try_load()
        .unwrap()
        .is_empty());
}

#[test]
fn not_found_operations_do_not_save() {
    let storage = CountingStorage::default();
    let mut session = MedicineSession::open(&storage, clock());
    let missing = MedicineId::from("missing");

    assert!(session.update(&missing, form("x", "y", "10:00")).is_none());
    assert!(!session.mark_taken(&missing, true));
    assert!(!session.delete(&missing));
    assert!(session.get_by_id(&missing).is_none());
    assert_eq!(storage.writes.get(), 0);
}

#[test]
fn reopen_reproduces_previous_session() {
    let conn = open_db_in_memory().unwrap();
    let clock = clock();

    let expected = {
        let mut session = MedicineSession::open(SqliteKvStorage::new(&conn), &clock);
        let first = session.add(form("Insulin", "10 units", "07:00"));
        session.add(form("Aspirin", "100mg", "12:00"));
        clock.advance(TimeDelta::minutes(3));
        session.mark_taken(&first.id, true);
        session.medicines().to_vec()
    };

    clock.advance(TimeDelta::hours(2));
    let reopened = MedicineSession::open(SqliteKvStorage::new(&conn), &clock);
    assert!(!reopened.is_load_degraded());
    assert_eq!(reopened.medicines(), expected.as_slice());
    assert_eq!(reopened.daily_summary().taken, 1);
}

#[test]
fn open_on_a_new_day_resets_and_persists() {
    let storage = CountingStorage::default();
    let clock = clock();
    let record_id = {
        let mut session = MedicineSession::open(&storage, &clock);
        let record = session.add(form("Sertraline", "50mg", "08:00"));
        session.mark_taken(&record.id, true);
        record.id
    };
    let writes_before = storage.writes.get();

    clock.advance(TimeDelta::days(1));
    let session = MedicineSession::open(&storage, &clock);

    let record = session.get_by_id(&record_id).unwrap();
    assert!(!record.taken);
    assert_eq!(record.taken_at, None);
    assert_eq!(storage.writes.get(), writes_before + 1);

    let persisted = MedicineRepository::new(&storage).try_load().unwrap();
    assert!(!persisted[0].taken);
}

#[test]
fn open_on_same_day_does_not_rewrite_storage() {
    let storage = CountingStorage::default();
    let clock = clock();
    {
        let mut session = MedicineSession::open(&storage, &clock);
        let record = session.add(form("Sertraline", "50mg", "08:00"));
        session.mark_taken(&record.id, true);
    }
    let writes_before = storage.writes.get();

    clock.advance(TimeDelta::hours(10));
    let session = MedicineSession::open(&storage, &clock);
    assert!(session.medicines()[0].taken);
    assert_eq!(storage.writes.get(), writes_before);
}

#[test]
fn corrupted_storage_opens_as_empty_session() {
    let storage = MemoryKvStorage::with_value(MEDICINES_STORAGE_KEY, "[{\"broken\":");
    let mut session = MedicineSession::open(&storage, clock());
    assert!(session.medicines().is_empty());
    assert!(session.is_load_degraded());

    // The session stays usable and overwrites the unreadable value.
    session.add(form("Paracetamol", "500mg", "08:00"));
    assert_eq!(
        MedicineRepository::new(&storage).try_load().unwrap().len(),
        1
    );
}

#[test]
fn save_failure_keeps_in_memory_state_authoritative() {
    let storage = CountingStorage::default();
    let mut session = MedicineSession::open(&storage, clock());
    session.add(form("Kept on disk", "1mg", "08:00"));
    assert!(session.is_persisted());

    storage.read_only.set(true);
    let record = session.add(form("Memory only", "2mg", "09:00"));
    assert!(!session.is_persisted());
    assert_eq!(session.medicines().len(), 2);
    assert_eq!(session.get_by_id(&record.id), Some(&record));

    let persisted = MedicineRepository::new(&storage).try_load().unwrap();
    assert_eq!(persisted.len(), 1);
}

#[test]
fn partially_readable_storage_keeps_good_records_and_flags_the_loss() {
    let raw = r#"[
        {"id":"good","name":"Metformin","dosage":"500mg","time":"07:30","taken":false,
         "createdAt":"2026-08-30T10:00:00Z","updatedAt":"2026-08-30T10:00:00Z"},
        {"id":"bad","name":"Garbled","dosage":"?","time":"25:99","taken":false,
         "createdAt":"2026-08-30T10:00:00Z","updatedAt":"2026-08-30T10:00:00Z"}
    ]"#;
    let storage = MemoryKvStorage::with_value(MEDICINES_STORAGE_KEY, raw);
    let session = MedicineSession::open(&storage, clock());

    assert!(session.is_load_degraded());
    assert_eq!(session.medicines().len(), 1);
    assert!(session.get_by_id(&MedicineId::from("good")).is_some());
}
