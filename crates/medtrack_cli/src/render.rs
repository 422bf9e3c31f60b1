//! Plain-text rendering of medicines and daily counts.
//!
//! Past instants are shown in the local time that applied at that instant,
//! the same conversion the daily reset uses.

use chrono::{DateTime, Utc};
use medtrack_core::{Clock, DailySummary, MedicineRecord};

/// One list line: status box, schedule, name, dosage, taken time, id.
pub fn record_line(record: &MedicineRecord, clock: &impl Clock) -> String {
    let status = if record.taken { "[x]" } else { "[ ]" };
    let taken = match record.taken_at {
        Some(taken_at) => format!(
            "  (taken at {})",
            clock.local_time_of(taken_at).format("%H:%M")
        ),
        None => String::new(),
    };
    format!(
        "{status} {}  {}  {}{taken}  id={}",
        record.time, record.name, record.dosage, record.id
    )
}

pub fn record_details(record: &MedicineRecord, clock: &impl Clock) -> String {
    let stamp = |value: DateTime<Utc>| {
        clock
            .local_time_of(value)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    };
    let mut lines = vec![
        format!("id:       {}", record.id),
        format!("name:     {}", record.name),
        format!("dosage:   {}", record.dosage),
        format!("time:     {}", record.time),
        format!("taken:    {}", if record.taken { "yes" } else { "no" }),
    ];
    if let Some(taken_at) = record.taken_at {
        lines.push(format!("taken at: {}", stamp(taken_at)));
    }
    lines.push(format!("created:  {}", stamp(record.created_at)));
    lines.push(format!("updated:  {}", stamp(record.updated_at)));
    lines.join("\n")
}

pub fn summary_line(summary: DailySummary) -> String {
    format!(
        "total: {}  taken: {}  pending: {}",
        summary.total, summary.taken, summary.pending
    )
}
