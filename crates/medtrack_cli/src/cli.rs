//! Command-line surface: subcommands and global flags.
//!
//! Global flags override the matching `MEDTRACK_*` environment variables.

use clap::{Args, Parser, Subcommand};
use medtrack_core::ConfigOverrides;
use std::path::PathBuf;

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(name = "medtrack", version, about = "Track daily medicines from the terminal")]
pub struct CliConfig {
    /// SQLite file holding the medicine list [env: MEDTRACK_DB_PATH]
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// trace|debug|info|warn|error [env: MEDTRACK_LOG_LEVEL]
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files [env: MEDTRACK_LOG_DIR]
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            db_path: self.db.clone(),
            log_level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum Command {
    /// List medicines in the order they were added
    List,
    /// Register a new medicine
    Add(AddArgs),
    /// Change name, dosage or time of a medicine
    Edit(EditArgs),
    /// Mark a medicine as taken today
    Take(IdArg),
    /// Undo a "taken" mark
    Untake(IdArg),
    /// Remove a medicine
    Delete(DeleteArgs),
    /// Show one medicine
    Show(IdArg),
    /// Print today's totals
    Summary,
}

#[derive(Args, Clone, Debug, Eq, PartialEq)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    /// Amount, unit and form, e.g. "500mg" or "2 tablets"
    #[arg(long)]
    pub dosage: String,

    /// Scheduled time as HH:MM
    #[arg(long)]
    pub time: String,
}

#[derive(Args, Clone, Debug, Eq, PartialEq)]
pub struct EditArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub dosage: Option<String>,

    #[arg(long)]
    pub time: Option<String>,
}

#[derive(Args, Clone, Debug, Eq, PartialEq)]
pub struct IdArg {
    pub id: String,
}

#[derive(Args, Clone, Debug, Eq, PartialEq)]
pub struct DeleteArgs {
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y', default_value_t = false)]
    pub yes: bool,
}
