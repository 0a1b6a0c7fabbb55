//! CSV export of the employee overview

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::store::reports::EmployeeSummary;

pub const EMPLOYEES_CSV_NAME: &str = "employees.csv";

const HEADER: [&str; 5] = ["Full Name", "Department", "#Dependents", "#Projects", "Total Hours"];

/// Write employee summaries as CSV to any writer
pub fn write_employees_csv<W: Write>(rows: &[EmployeeSummary], out: W) -> Result<()> {
    let mut wtr = Writer::from_writer(out);

    wtr.write_record(HEADER).context("Failed to write CSV header")?;

    for row in rows {
        wtr.write_record([
            row.full_name.clone(),
            row.dept_name.clone().unwrap_or_else(|| "N/A".to_string()),
            row.num_dependents.to_string(),
            row.num_projects.to_string(),
            format!("{:.2}", row.total_hours),
        ])
        .with_context(|| format!("Failed to write employee: {}", row.full_name))?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Export employee summaries to a CSV file
pub fn export_employees_csv(rows: &[EmployeeSummary], file_path: &Path) -> Result<()> {
    let file = std::fs::File::create(file_path)
        .with_context(|| format!("Failed to create CSV file: {}", file_path.display()))?;
    write_employees_csv(rows, file)?;

    log::info!("CSV file exported to: {}", file_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, dept: Option<&str>, hours: f64) -> EmployeeSummary {
        EmployeeSummary {
            ssn: "123456789".to_string(),
            full_name: name.to_string(),
            dept_name: dept.map(str::to_string),
            num_dependents: 2,
            num_projects: 1,
            total_hours: hours,
        }
    }

    #[test]
    fn test_employees_csv_layout() {
        let rows = vec![
            summary("John Smith", Some("Research"), 32.5),
            summary("Joyce English", None, 0.0),
        ];

        let mut out = Vec::new();
        write_employees_csv(&rows, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Full Name,Department,#Dependents,#Projects,Total Hours\n\
             John Smith,Research,2,1,32.50\n\
             Joyce English,N/A,2,1,0.00\n"
        );
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let rows = vec![summary("Smith, John", Some("R&D"), 1.0)];

        let mut out = Vec::new();
        write_employees_csv(&rows, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Smith, John\",R&D,2,1,1.00"));
    }
}
