//! Persistence adapters for core collections.
//!
//! # Responsibility
//! - Translate in-memory collections to and from storage slots.
//! - Absorb storage failures at this boundary.

pub mod medicine_repo;
