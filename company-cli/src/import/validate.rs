//! Per-row validation, without any store access

use super::cell::{CellValue, try_parse_hours};
use super::outcome::RowErrorKind;
use super::reader::ImportRow;

/// A row that passed every format check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAssignment {
    pub employee_ssn: String,
    pub project_id: i64,
    pub hours: f64,
}

/// Check one row, stopping at the first failure
///
/// Order: both cells present, hours a positive number, SSN digits only.
pub fn validate_row(row: &ImportRow, project_id: i64) -> Result<ValidatedAssignment, RowErrorKind> {
    if row.raw_ssn.is_empty() || row.raw_hours.is_empty() {
        return Err(RowErrorKind::MissingField);
    }

    let hours = positive_hours(&row.raw_hours).ok_or(RowErrorKind::InvalidHours)?;
    let ssn = normalize_ssn(&row.raw_ssn).ok_or(RowErrorKind::InvalidSsnFormat)?;

    Ok(ValidatedAssignment {
        employee_ssn: ssn,
        project_id,
        hours,
    })
}

/// Hours as a number strictly greater than zero
pub fn positive_hours(raw: &CellValue) -> Option<f64> {
    try_parse_hours(raw).ok().filter(|hours| *hours > 0.0)
}

/// Trimmed SSN text, if it is a non-empty run of ASCII digits
pub fn normalize_ssn(raw: &CellValue) -> Option<String> {
    let text = raw.to_text();
    let ssn = text.trim();
    if !ssn.is_empty() && ssn.chars().all(|c| c.is_ascii_digit()) {
        Some(ssn.to_string())
    } else {
        None
    }
}
