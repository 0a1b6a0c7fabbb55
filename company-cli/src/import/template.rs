//! Example workbook showing the expected upload layout

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use super::reader::cols;

const SHEET_NAME: &str = "Hours";

const EXAMPLE_ROWS: [(&str, f64); 2] = [("200243095", 8.0), ("359624751", 3.5)];

/// Suggested download name for a project's template
pub fn template_file_name(project_id: i64) -> String {
    format!("project_{}_hours_template.xlsx", project_id)
}

/// Build the template: a `SSN, Hours` header and two example rows
pub fn template_workbook() -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    worksheet.write_string_with_format(0, cols::SSN as u16, "SSN", &bold)?;
    worksheet.write_string_with_format(0, cols::HOURS as u16, "Hours", &bold)?;

    for (i, (ssn, hours)) in EXAMPLE_ROWS.iter().enumerate() {
        let row = (i + 1) as u32;
        // SSNs are text so leading zeros survive
        worksheet.write_string(row, cols::SSN as u16, *ssn)?;
        worksheet.write_number(row, cols::HOURS as u16, *hours)?;
    }

    worksheet.set_column_width(cols::SSN as u16, 14)?;

    workbook
        .save_to_buffer()
        .context("Failed to build hours template workbook")
}
