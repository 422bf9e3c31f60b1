//! In-memory, authoritative medicine collection.

pub mod medicine_store;
