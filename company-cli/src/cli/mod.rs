//! Command-line interface definition

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::export::EMPLOYEES_CSV_NAME;
use crate::store::employees::Sex;
use crate::store::reports::{EmployeeSort, ProjectSort};

#[derive(Debug, Parser)]
#[command(name = "company-cli", version, about = "Administration tools for the company database")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database URL, overriding the configuration and DATABASE_URL
    #[arg(long, global = true, value_name = "URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import hours for a project from an .xlsx file
    Import(ImportCommands),
    /// Write an example .xlsx showing the import layout
    Template(TemplateCommands),
    /// Add hours for one employee on a project
    RecordHours(RecordHoursCommands),
    /// List employees, or export them as CSV
    Employees(EmployeesCommands),
    /// Add, edit or delete an employee
    Employee(EmployeeArgs),
    /// Show managers with department headcount and hours
    Managers,
    /// List projects with headcount and total hours
    Projects(ProjectsCommands),
    /// Show the hours recorded on a project
    Project(ProjectCommands),
}

#[derive(Debug, Args)]
pub struct ImportCommands {
    /// Project number to import into
    #[arg(short, long)]
    pub project: i64,

    /// Spreadsheet with SSN in column A and Hours in column B
    pub file: PathBuf,

    /// Output format for the import result
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct TemplateCommands {
    /// Project number, used in the default file name
    #[arg(short, long)]
    pub project: i64,

    /// Where to write the template (defaults to project_<N>_hours_template.xlsx)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RecordHoursCommands {
    #[arg(short, long)]
    pub project: i64,

    #[arg(long)]
    pub ssn: String,

    /// Hours to add to the employee's total on the project
    #[arg(long, allow_hyphen_values = true)]
    pub hours: String,
}

#[derive(Debug, Args)]
pub struct EmployeesCommands {
    /// Department number filter
    #[arg(long)]
    pub dept: Option<String>,

    /// Case-insensitive name search
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    #[arg(long, value_enum, default_value_t = SortArg::NameAsc)]
    pub sort: SortArg,

    /// Write the list as CSV instead of printing it
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = EMPLOYEES_CSV_NAME)]
    pub csv: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    pub command: EmployeeCommands,
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommands {
    /// Add a new employee
    Add(EmployeeAddCommands),
    /// Change address, salary, department and optional fields
    Edit(EmployeeEditCommands),
    /// Delete an employee with no remaining references
    Delete {
        /// SSN of the employee
        ssn: String,
    },
    /// Show one employee
    Show {
        /// SSN of the employee
        ssn: String,
    },
}

#[derive(Debug, Args)]
pub struct EmployeeAddCommands {
    #[arg(long)]
    pub ssn: String,

    #[arg(long)]
    pub fname: String,

    /// Middle initial (first letter is kept, `-` when omitted)
    #[arg(long)]
    pub minit: Option<String>,

    #[arg(long)]
    pub lname: String,

    #[arg(long, default_value = "")]
    pub address: String,

    #[arg(long, value_enum)]
    pub sex: Option<SexArg>,

    #[arg(long, allow_hyphen_values = true)]
    pub salary: String,

    /// Department number
    #[arg(long, allow_hyphen_values = true)]
    pub dno: String,

    /// SSN of the supervisor
    #[arg(long)]
    pub super_ssn: Option<String>,
}

#[derive(Debug, Args)]
pub struct EmployeeEditCommands {
    /// SSN of the employee to edit
    pub ssn: String,

    #[arg(long, default_value = "")]
    pub address: String,

    #[arg(long, allow_hyphen_values = true)]
    pub salary: String,

    /// Department number
    #[arg(long, allow_hyphen_values = true)]
    pub dno: String,

    /// SSN of the supervisor (unchanged when omitted)
    #[arg(long)]
    pub super_ssn: Option<String>,

    #[arg(long, value_enum)]
    pub sex: Option<SexArg>,

    #[arg(long)]
    pub minit: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProjectsCommands {
    #[arg(long, value_enum, default_value_t = ProjectSortArg::HeadcountDesc)]
    pub sort: ProjectSortArg,
}

#[derive(Debug, Args)]
pub struct ProjectCommands {
    /// Project number
    pub project: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    NameAsc,
    NameDesc,
    HoursAsc,
    HoursDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectSortArg {
    HeadcountAsc,
    HeadcountDesc,
    HoursAsc,
    HoursDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SexArg {
    #[value(name = "M", alias = "m")]
    M,
    #[value(name = "F", alias = "f")]
    F,
}

impl From<ProjectSortArg> for ProjectSort {
    fn from(sort: ProjectSortArg) -> Self {
        match sort {
            ProjectSortArg::HeadcountAsc => ProjectSort::HeadcountAsc,
            ProjectSortArg::HeadcountDesc => ProjectSort::HeadcountDesc,
            ProjectSortArg::HoursAsc => ProjectSort::HoursAsc,
            ProjectSortArg::HoursDesc => ProjectSort::HoursDesc,
        }
    }
}

impl From<SexArg> for Sex {
    fn from(sex: SexArg) -> Self {
        match sex {
            SexArg::M => Sex::M,
            SexArg::F => Sex::F,
        }
    }
}

impl From<SortArg> for EmployeeSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::NameAsc => EmployeeSort::NameAsc,
            SortArg::NameDesc => EmployeeSort::NameDesc,
            SortArg::HoursAsc => EmployeeSort::HoursAsc,
            SortArg::HoursDesc => EmployeeSort::HoursDesc,
        }
    }
}
