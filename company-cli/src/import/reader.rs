//! Read hours rows from an uploaded workbook
//!
//! Layout of the sheet:
//! - Row 1 is a header (`SSN`, `Hours`) and is never validated
//! - Column A holds the SSN, column B the hours; other columns are ignored

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};
use super::cell::CellValue;

/// Column indices (must match the template writer)
pub(crate) mod cols {
    pub const SSN: u32 = 0;
    pub const HOURS: u32 = 1;
}

/// Whole-file failure: nothing in the file is processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No file was supplied, or it has no name
    MissingFile,
    /// The bytes are not a readable workbook
    Unreadable(String),
    /// The workbook contains no worksheet
    NoSheet,
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::MissingFile => write!(f, "Please choose an .xlsx file."),
            FormatError::Unreadable(_) | FormatError::NoSheet => write!(
                f,
                "Could not read file; expected a supported spreadsheet format (.xlsx)."
            ),
        }
    }
}

impl std::error::Error for FormatError {}

/// One data row of the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    /// 1-based sheet row; the first data row is 2
    pub row_index: u32,
    pub raw_ssn: CellValue,
    pub raw_hours: CellValue,
}

impl ImportRow {
    pub fn new(row_index: u32, raw_ssn: CellValue, raw_hours: CellValue) -> Self {
        Self {
            row_index,
            raw_ssn,
            raw_hours,
        }
    }
}

/// Data rows of the first worksheet, in sheet order
///
/// Consumed by iteration; the underlying workbook is closed before the
/// first row is produced.
#[derive(Debug)]
pub struct WorkbookRows {
    range: Range<Data>,
    next_row: u32,
    last_row: Option<u32>,
}

impl WorkbookRows {
    /// Decode `bytes` as an `.xlsx` workbook
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|err| FormatError::Unreadable(err.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(FormatError::NoSheet)?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|err| FormatError::Unreadable(err.to_string()))?;

        log::debug!(
            "Reading sheet '{}' ({} rows)",
            sheet_name,
            range.end().map(|(row, _)| row + 1).unwrap_or(0)
        );

        Ok(Self::from_range(range))
    }

    fn from_range(range: Range<Data>) -> Self {
        let last_row = range.end().map(|(row, _)| row);
        Self {
            range,
            // Absolute 0-based row 0 is the header
            next_row: 1,
            last_row,
        }
    }

    fn cell(&self, row: u32, col: u32) -> CellValue {
        self.range
            .get_value((row, col))
            .map(CellValue::from)
            .unwrap_or(CellValue::Empty)
    }
}

impl Iterator for WorkbookRows {
    type Item = ImportRow;

    fn next(&mut self) -> Option<ImportRow> {
        let last_row = self.last_row?;
        if self.next_row > last_row {
            return None;
        }

        let row = self.next_row;
        self.next_row += 1;

        Some(ImportRow::new(
            row + 1,
            self.cell(row, cols::SSN),
            self.cell(row, cols::HOURS),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.last_row {
            Some(last) if self.next_row <= last => (last - self.next_row + 1) as usize,
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}
