//! Domain model for the medicine list.
//!
//! # Responsibility
//! - Define the record, id, and form shapes shared by store and persistence.
//! - Keep the `HH:MM` schedule value strongly typed.

pub mod medicine;
pub mod time_of_day;
