//! Form validation in front of the core store.
//!
//! The core trusts its input, so every add/edit passes through here first.

use medtrack_core::{MedicineFormData, TimeOfDay, TimeOfDayParseError};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    EmptyName,
    EmptyDosage,
    EmptyTime,
    InvalidTime(TimeOfDayParseError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => f.write_str("name is required"),
            Self::EmptyDosage => f.write_str("dosage is required"),
            Self::EmptyTime => f.write_str("time is required"),
            Self::InvalidTime(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTime(err) => Some(err),
            _ => None,
        }
    }
}

/// Raw, untrimmed user input.
#[derive(Debug, Clone, Copy)]
pub struct RawForm<'a> {
    pub name: &'a str,
    pub dosage: &'a str,
    pub time: &'a str,
}

/// Trims text fields and parses the schedule.
pub fn validate(raw: RawForm<'_>) -> Result<MedicineFormData, FormError> {
    let name = raw.name.trim();
    if name.is_empty() {
        return Err(FormError::EmptyName);
    }
    let dosage = raw.dosage.trim();
    if dosage.is_empty() {
        return Err(FormError::EmptyDosage);
    }
    let time = raw.time.trim();
    if time.is_empty() {
        return Err(FormError::EmptyTime);
    }
    let time: TimeOfDay = time.parse().map_err(FormError::InvalidTime)?;

    Ok(MedicineFormData {
        name: name.to_string(),
        dosage: dosage.to_string(),
        time,
    })
}

/// Overlays optional edits on the current values, then validates.
pub fn merge_edit(
    current: &MedicineFormData,
    name: Option<&str>,
    dosage: Option<&str>,
    time: Option<&str>,
) -> Result<MedicineFormData, FormError> {
    let current_time = current.time.to_string();
    validate(RawForm {
        name: name.unwrap_or(&current.name),
        dosage: dosage.unwrap_or(&current.dosage),
        time: time.unwrap_or(&current_time),
    })
}

#[cfg(test)]
mod tests {
    use super::{merge_edit, validate, FormError, RawForm};

    fn raw<'a>(name: &'a str, dosage: &'a str, time: &'a str) -> RawForm<'a> {
        RawForm { name, dosage, time }
    }

    #[test]
    fn trims_and_parses() {
        let form = validate(raw("  Paracetamol ", " 500mg", "08:00 ")).unwrap();
        assert_eq!(form.name, "Paracetamol");
        assert_eq!(form.dosage, "500mg");
        assert_eq!(form.time.to_string(), "08:00");
    }

    #[test]
    fn rejects_blank_fields_in_order() {
        assert_eq!(validate(raw("  ", "", "")), Err(FormError::EmptyName));
        assert_eq!(validate(raw("A", " ", "")), Err(FormError::EmptyDosage));
        assert_eq!(validate(raw("A", "1mg", " ")), Err(FormError::EmptyTime));
        assert!(matches!(
            validate(raw("A", "1mg", "8 o'clock")),
            Err(FormError::InvalidTime(_))
        ));
    }

    #[test]
    fn merge_keeps_unspecified_fields() {
        let current = validate(raw("Paracetamol", "500mg", "08:00")).unwrap();
        let merged = merge_edit(&current, None, Some("750mg"), None).unwrap();
        assert_eq!(merged.name, "Paracetamol");
        assert_eq!(merged.dosage, "750mg");
        assert_eq!(merged.time, current.time);

        assert_eq!(
            merge_edit(&current, Some(""), None, None),
            Err(FormError::EmptyName)
        );
    }
}
