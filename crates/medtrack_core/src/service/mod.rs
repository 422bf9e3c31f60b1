//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and persistence into one session API.
//! - Keep UI layers decoupled from storage details.

pub mod medicine_session;
