//! Employee add, edit and delete, as submitted from the employee form

use sqlx::SqlitePool;

use crate::auth::{Actor, Forbidden, Role};
use crate::store::employees::{
    self, EmployeeChanges, EmployeeRecord, Sex, is_foreign_key_violation, is_unique_violation,
};

pub const EMPLOYEE_ADDED: &str = "Employee added.";
pub const EMPLOYEE_UPDATED: &str = "Employee updated.";
pub const EMPLOYEE_DELETED: &str = "Employee deleted.";

/// Raw input for a new employee
#[derive(Debug, Clone, Default)]
pub struct NewEmployeeForm {
    pub ssn: String,
    pub fname: String,
    pub minit: Option<String>,
    pub lname: String,
    pub address: String,
    pub sex: Option<Sex>,
    pub salary: String,
    pub dno: String,
    pub super_ssn: Option<String>,
}

/// Raw input for editing an employee; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct EditEmployeeForm {
    pub address: String,
    pub salary: String,
    pub dno: String,
    pub super_ssn: Option<String>,
    pub sex: Option<Sex>,
    pub minit: Option<String>,
}

#[derive(Debug)]
pub enum EmployeeError {
    Forbidden(Forbidden),
    InvalidSsn,
    InvalidSalaryOrDept,
    DuplicateSsn,
    StillReferenced,
    NotFound,
    Store {
        action: &'static str,
        source: sqlx::Error,
    },
}

impl std::fmt::Display for EmployeeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployeeError::Forbidden(err) => write!(f, "{}", err),
            EmployeeError::InvalidSsn => write!(f, "SSN must be digits only."),
            EmployeeError::InvalidSalaryOrDept => {
                write!(f, "Salary must be ≥ 0 and Dept # must be a positive integer.")
            }
            EmployeeError::DuplicateSsn => write!(f, "That SSN already exists. Use a different SSN."),
            EmployeeError::StillReferenced => write!(
                f,
                "Cannot delete: employee is referenced by other data (projects/dependents/manager)."
            ),
            EmployeeError::NotFound => write!(f, "No such employee SSN."),
            EmployeeError::Store { action, source } => {
                write!(f, "Could not {} employee: {}", action, source)
            }
        }
    }
}

impl std::error::Error for EmployeeError {}

impl From<Forbidden> for EmployeeError {
    fn from(err: Forbidden) -> Self {
        EmployeeError::Forbidden(err)
    }
}

pub async fn create_employee(pool: &SqlitePool, actor: &Actor, form: NewEmployeeForm) -> Result<(), EmployeeError> {
    actor.require(Role::Admin)?;

    let ssn = form.ssn.trim();
    if ssn.is_empty() || !ssn.chars().all(|c| c.is_ascii_digit()) {
        return Err(EmployeeError::InvalidSsn);
    }
    let (salary, dno) = parse_salary_and_dept(&form.salary, &form.dno)?;

    let record = EmployeeRecord {
        ssn: ssn.to_string(),
        fname: form.fname.trim().to_string(),
        minit: normalize_minit(form.minit.as_deref()),
        lname: form.lname.trim().to_string(),
        address: non_blank(&form.address),
        sex: form.sex,
        salary,
        dno,
        super_ssn: form.super_ssn.as_deref().and_then(non_blank),
    };

    employees::insert_employee(pool, &record).await.map_err(|err| {
        if is_unique_violation(&err) {
            EmployeeError::DuplicateSsn
        } else {
            EmployeeError::Store {
                action: "add",
                source: err,
            }
        }
    })?;

    log::info!("User '{}' added employee {}", actor.username, record.ssn);
    Ok(())
}

pub async fn edit_employee(
    pool: &SqlitePool,
    actor: &Actor,
    ssn: &str,
    form: EditEmployeeForm,
) -> Result<(), EmployeeError> {
    actor.require(Role::Admin)?;

    let (salary, dno) = parse_salary_and_dept(&form.salary, &form.dno)?;
    let changes = EmployeeChanges {
        address: non_blank(&form.address),
        salary,
        dno,
        super_ssn: form.super_ssn.as_deref().and_then(non_blank),
        sex: form.sex,
        minit: form.minit.as_deref().map(|minit| normalize_minit(Some(minit))),
    };

    let ssn = ssn.trim();
    let updated = employees::update_employee(pool, ssn, &changes)
        .await
        .map_err(|err| EmployeeError::Store {
            action: "update",
            source: err,
        })?;
    if !updated {
        return Err(EmployeeError::NotFound);
    }

    log::info!("User '{}' updated employee {}", actor.username, ssn);
    Ok(())
}

pub async fn remove_employee(pool: &SqlitePool, actor: &Actor, ssn: &str) -> Result<(), EmployeeError> {
    actor.require(Role::Admin)?;

    let ssn = ssn.trim();
    let deleted = employees::delete_employee(pool, ssn).await.map_err(|err| {
        if is_foreign_key_violation(&err) {
            EmployeeError::StillReferenced
        } else {
            EmployeeError::Store {
                action: "delete",
                source: err,
            }
        }
    })?;
    if !deleted {
        return Err(EmployeeError::NotFound);
    }

    log::info!("User '{}' deleted employee {}", actor.username, ssn);
    Ok(())
}

/// Salary a finite number >= 0, department number >= 1
fn parse_salary_and_dept(salary: &str, dno: &str) -> Result<(f64, i64), EmployeeError> {
    let salary = salary
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s >= 0.0);
    let dno = dno.trim().parse::<i64>().ok().filter(|d| *d >= 1);

    match (salary, dno) {
        (Some(salary), Some(dno)) => Ok((salary, dno)),
        _ => Err(EmployeeError::InvalidSalaryOrDept),
    }
}

/// First letter, upper-cased; `-` when blank
fn normalize_minit(raw: Option<&str>) -> String {
    raw.and_then(|m| m.trim().chars().next())
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
