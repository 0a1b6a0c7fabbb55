//! Raw spreadsheet cell values and their conversions

use calamine::Data;

/// A cell as read from the sheet, before any validation
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell, or a column beyond the sheet bounds
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Dates, durations and formula errors, kept as their display text
    Other(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Text form of the cell, the way a user reads it in the sheet
    ///
    /// Whole numbers print without a fractional part so a numeric SSN
    /// cell like `200243095` stays a digit string.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) | CellValue::Other(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) if s.is_empty() => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(_) => CellValue::Other(cell.to_string()),
            Data::DateTimeIso(s) => CellValue::Other(s.clone()),
            Data::DurationIso(s) => CellValue::Other(s.clone()),
            Data::Error(_) => CellValue::Other(cell.to_string()),
        }
    }
}

/// The cell does not hold a finite number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFailure;

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not a number")
    }
}

impl std::error::Error for ParseFailure {}

/// Read an hours value from a cell
///
/// Numeric cells are taken as-is, text cells are parsed after trimming.
/// Booleans, dates and non-finite values are not hours.
pub fn try_parse_hours(raw: &CellValue) -> Result<f64, ParseFailure> {
    let value = match raw {
        CellValue::Int(i) => *i as f64,
        CellValue::Float(f) => *f,
        CellValue::Text(s) => s.trim().parse::<f64>().map_err(|_| ParseFailure)?,
        CellValue::Empty | CellValue::Bool(_) | CellValue::Other(_) => return Err(ParseFailure),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseFailure)
    }
}
