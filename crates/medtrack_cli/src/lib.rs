//! Terminal front-end for medtrack.
//! The `medtrack` binary only wires configuration, logging and storage
//! around [`app::run`].

pub mod app;
pub mod cli;
pub mod form;
pub mod render;
