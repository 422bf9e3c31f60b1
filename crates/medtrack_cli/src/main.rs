//! `medtrack` command-line front-end.
//!
//! # Responsibility
//! - Resolve configuration, bootstrap logging and storage.
//! - Hand the parsed command to [`medtrack_cli::app::run`] on real
//!   terminal streams.

use clap::Parser;
use log::warn;
use medtrack_cli::app::{run, Console};
use medtrack_cli::cli::CliConfig;
use medtrack_core::db::{open_db, open_db_in_memory};
use medtrack_core::{init_logging, MedicineSession, MedtrackConfig, SqliteKvStorage, SystemClock};
use rusqlite::Connection;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli_config = CliConfig::parse();

    let config = match MedtrackConfig::from_env(cli_config.overrides()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("medtrack: configuration error: {err}");
            return ExitCode::from(2);
        }
    };

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("medtrack: file logging disabled: {err}");
        }
    }

    let Some(conn) = open_storage(&config) else {
        return ExitCode::FAILURE;
    };

    let clock = SystemClock;
    let mut session = MedicineSession::open(SqliteKvStorage::new(&conn), clock);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let mut err = io::stderr();
    let mut console = Console {
        input: &mut input,
        out: &mut out,
        err: &mut err,
    };

    match run(cli_config.command, &mut session, &clock, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("medtrack: {message}");
            ExitCode::FAILURE
        }
    }
}

// An unusable database file degrades to an in-memory list for this run.
fn open_storage(config: &MedtrackConfig) -> Option<Connection> {
    match open_db(&config.db_path) {
        Ok(conn) => Some(conn),
        Err(err) => {
            warn!("event=storage_fallback module=cli status=degraded error={err}");
            eprintln!(
                "medtrack: cannot open `{}` ({err}); changes will not be saved",
                config.db_path.display()
            );
            match open_db_in_memory() {
                Ok(conn) => Some(conn),
                Err(err) => {
                    eprintln!("medtrack: in-memory storage failed: {err}");
                    None
                }
            }
        }
    }
}
