//! Result of one hours import

use serde::Serialize;

/// Why a single row was skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowErrorKind {
    MissingField,
    InvalidHours,
    InvalidSsnFormat,
    UnknownEmployee { ssn: String },
    StoreError { detail: String },
}

impl std::fmt::Display for RowErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowErrorKind::MissingField => write!(f, "missing SSN or Hours"),
            RowErrorKind::InvalidHours => write!(f, "Hours must be a positive number"),
            RowErrorKind::InvalidSsnFormat => write!(f, "SSN must be digits only"),
            RowErrorKind::UnknownEmployee { ssn } => write!(f, "No employee with SSN {}", ssn),
            RowErrorKind::StoreError { detail } => write!(f, "DB error: {}", detail),
        }
    }
}

/// A skipped row and the reason
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    pub row_index: u32,
    #[serde(flatten)]
    pub kind: RowErrorKind,
    pub message: String,
}

impl RowError {
    pub fn new(row_index: u32, kind: RowErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            row_index,
            kind,
            message,
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row_index, self.message)
    }
}

/// Counts and per-row errors of a finished import
///
/// Errors are kept in sheet order. Built once by the pipeline and only read
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportOutcome {
    success_count: usize,
    errors: Vec<RowError>,
}

impl ImportOutcome {
    pub(crate) fn new(success_count: usize, errors: Vec<RowError>) -> Self {
        Self {
            success_count,
            errors,
        }
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn errors(&self) -> &[RowError] {
        &self.errors
    }

    /// Data rows read from the sheet, imported or not
    pub fn rows_seen(&self) -> usize {
        self.success_count + self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_display() {
        let err = RowError::new(4, RowErrorKind::UnknownEmployee { ssn: "999999999".to_string() });
        assert_eq!(err.to_string(), "Row 4: No employee with SSN 999999999");

        let err = RowError::new(
            7,
            RowErrorKind::StoreError {
                detail: "database is locked".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Row 7: DB error: database is locked");
    }

    #[test]
    fn test_outcome_serializes_kind_and_message() {
        let outcome = ImportOutcome::new(1, vec![RowError::new(2, RowErrorKind::InvalidSsnFormat)]);
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["success_count"], 1);
        assert_eq!(json["errors"][0]["row_index"], 2);
        assert_eq!(json["errors"][0]["kind"], "invalid_ssn_format");
        assert_eq!(json["errors"][0]["message"], "SSN must be digits only");
    }
}
