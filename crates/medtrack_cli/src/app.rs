//! Command dispatch against an open medicine session.
//!
//! # Responsibility
//! - Run one parsed command and print its feedback.
//! - Ask for confirmation before deleting unless `--yes` was given.
//! - Warn when stored data was lost on open or a change was not saved.

use crate::cli::Command;
use crate::form::{merge_edit, validate, RawForm};
use crate::render;
use medtrack_core::{Clock, KvStorage, MedicineId, MedicineSession};
use std::io::{BufRead, Write};

/// Terminal streams used by [`run`].
pub struct Console<'a> {
    pub input: &'a mut dyn BufRead,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

/// Executes `command`. `Err` carries the message to print before exiting
/// with a failure status.
pub fn run<S: KvStorage, C: Clock>(
    command: Command,
    session: &mut MedicineSession<S, C>,
    clock: &impl Clock,
    console: &mut Console<'_>,
) -> Result<(), String> {
    if session.is_load_degraded() {
        say(
            console.err,
            "medtrack: warning: stored medicines could not be fully read; \
             unreadable entries will be overwritten by the next change",
        )?;
    }

    match command {
        Command::List => {
            if session.medicines().is_empty() {
                say(console.out, "No medicines yet. Add one with `medtrack add`.")?;
            }
            for record in session.medicines() {
                say(console.out, &render::record_line(record, clock))?;
            }
            if !session.medicines().is_empty() {
                say(console.out, &render::summary_line(session.daily_summary()))?;
            }
        }
        Command::Add(args) => {
            let form = validate(RawForm {
                name: &args.name,
                dosage: &args.dosage,
                time: &args.time,
            })
            .map_err(|err| err.to_string())?;
            let record = session.add(form);
            say(console.out, &format!("Added {}.", record.name))?;
            say(console.out, &render::record_line(&record, clock))?;
        }
        Command::Edit(args) => {
            let id = MedicineId::from(args.id);
            let current = session
                .get_by_id(&id)
                .ok_or_else(|| not_found(&id))?
                .form_data();
            let form = merge_edit(
                &current,
                args.name.as_deref(),
                args.dosage.as_deref(),
                args.time.as_deref(),
            )
            .map_err(|err| err.to_string())?;
            let record = session.update(&id, form).ok_or_else(|| not_found(&id))?;
            say(console.out, &format!("Updated {}.", record.name))?;
            say(console.out, &render::record_line(&record, clock))?;
        }
        Command::Take(args) => set_taken(session, MedicineId::from(args.id), true, console)?,
        Command::Untake(args) => set_taken(session, MedicineId::from(args.id), false, console)?,
        Command::Delete(args) => {
            let id = MedicineId::from(args.id);
            let name = session
                .get_by_id(&id)
                .ok_or_else(|| not_found(&id))?
                .name
                .clone();
            if !args.yes && !confirm(console, &format!("Delete \"{name}\"?"))? {
                say(console.out, "Cancelled.")?;
                return Ok(());
            }
            session.delete(&id);
            say(console.out, &format!("Removed {name}."))?;
        }
        Command::Show(args) => {
            let id = MedicineId::from(args.id);
            let record = session.get_by_id(&id).ok_or_else(|| not_found(&id))?;
            say(console.out, &render::record_details(record, clock))?;
        }
        Command::Summary => say(console.out, &render::summary_line(session.daily_summary()))?,
    }

    if !session.is_persisted() {
        say(
            console.err,
            "medtrack: warning: changes could not be saved; see logs",
        )?;
    }
    Ok(())
}

fn set_taken<S: KvStorage, C: Clock>(
    session: &mut MedicineSession<S, C>,
    id: MedicineId,
    taken: bool,
    console: &mut Console<'_>,
) -> Result<(), String> {
    if !session.mark_taken(&id, taken) {
        return Err(not_found(&id));
    }
    let name = session
        .get_by_id(&id)
        .map(|record| record.name.as_str())
        .unwrap_or_default();
    if taken {
        say(console.out, &format!("Marked {name} as taken."))
    } else {
        say(console.out, &format!("Unmarked {name}."))
    }
}

fn confirm(console: &mut Console<'_>, question: &str) -> Result<bool, String> {
    write!(console.out, "{question} [y/N] ")
        .and_then(|()| console.out.flush())
        .map_err(|err| format!("failed to write prompt: {err}"))?;

    let mut answer = String::new();
    console
        .input
        .read_line(&mut answer)
        .map_err(|err| format!("failed to read answer: {err}"))?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn say(stream: &mut dyn Write, text: &str) -> Result<(), String> {
    writeln!(stream, "{text}").map_err(|err| format!("failed to write output: {err}"))
}

fn not_found(id: &MedicineId) -> String {
    format!("no medicine with id `{id}`")
}
