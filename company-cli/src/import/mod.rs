//! Bulk import of project hours from `.xlsx` uploads
//!
//! Column A holds the employee SSN, column B the hours; row 1 is a header.
//! Every data row is validated on its own and added to the employee's
//! existing hours on the project.

pub mod cell;
pub mod outcome;
pub mod pipeline;
pub mod reader;
pub mod summary;
pub mod template;
pub mod validate;

pub use cell::CellValue;
pub use outcome::ImportOutcome;
pub use pipeline::import_hours;
pub use reader::FormatError;
pub use summary::ImportSummary;
pub use template::{template_file_name, template_workbook};
