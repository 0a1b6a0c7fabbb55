//! Employee rows: insert, partial update, delete, lookup
//!
//! These return `sqlx::Error` untouched so callers can tell constraint
//! violations (duplicate SSN, rows still referencing the employee) apart.

use sqlx::{Row, SqlitePool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    M,
    F,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::M => "M",
            Sex::F => "F",
        }
    }

    fn from_column(value: Option<&str>) -> Option<Self> {
        match value {
            Some("M") => Some(Sex::M),
            Some("F") => Some(Sex::F),
            _ => None,
        }
    }
}

/// A complete employee row
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub ssn: String,
    pub fname: String,
    /// Single upper-case letter, `-` when unknown
    pub minit: String,
    pub lname: String,
    pub address: Option<String>,
    pub sex: Option<Sex>,
    pub salary: f64,
    pub dno: i64,
    pub super_ssn: Option<String>,
}

/// Editable fields; `None` leaves the column as it is
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeChanges {
    pub address: Option<String>,
    pub salary: f64,
    pub dno: i64,
    pub super_ssn: Option<String>,
    pub sex: Option<Sex>,
    pub minit: Option<String>,
}

pub async fn insert_employee(pool: &SqlitePool, employee: &EmployeeRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO employee (ssn, fname, minit, lname, address, sex, salary, dno, super_ssn)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&employee.ssn)
    .bind(&employee.fname)
    .bind(&employee.minit)
    .bind(&employee.lname)
    .bind(&employee.address)
    .bind(employee.sex.map(Sex::as_str))
    .bind(employee.salary)
    .bind(employee.dno)
    .bind(&employee.super_ssn)
    .execute(pool)
    .await?;

    Ok(())
}

/// Apply `changes` to `ssn`; returns false when no such employee exists
pub async fn update_employee(pool: &SqlitePool, ssn: &str, changes: &EmployeeChanges) -> Result<bool, sqlx::Error> {
    let mut sets = vec!["address = ?", "salary = ?", "dno = ?"];
    if changes.super_ssn.is_some() {
        sets.push("super_ssn = ?");
    }
    if changes.sex.is_some() {
        sets.push("sex = ?");
    }
    if changes.minit.is_some() {
        sets.push("minit = ?");
    }
    let sql = format!("UPDATE employee SET {} WHERE ssn = ?", sets.join(", "));

    let mut query = sqlx::query(&sql)
        .bind(&changes.address)
        .bind(changes.salary)
        .bind(changes.dno);
    if let Some(super_ssn) = &changes.super_ssn {
        query = query.bind(super_ssn);
    }
    if let Some(sex) = changes.sex {
        query = query.bind(sex.as_str());
    }
    if let Some(minit) = &changes.minit {
        query = query.bind(minit);
    }

    let result = query.bind(ssn).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

/// Delete `ssn`; returns false when no such employee exists
pub async fn delete_employee(pool: &SqlitePool, ssn: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM employee WHERE ssn = ?")
        .bind(ssn)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn find_employee(pool: &SqlitePool, ssn: &str) -> Result<Option<EmployeeRecord>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT ssn, fname, minit, lname, address, sex, salary, dno, super_ssn
        FROM employee WHERE ssn = ?
        "#,
    )
    .bind(ssn)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let sex: Option<String> = row.try_get("sex")?;
    Ok(Some(EmployeeRecord {
        ssn: row.try_get("ssn")?,
        fname: row.try_get("fname")?,
        minit: row.try_get("minit")?,
        lname: row.try_get("lname")?,
        address: row.try_get("address")?,
        sex: Sex::from_column(sex.as_deref()),
        salary: row.try_get::<Option<f64>, _>("salary")?.unwrap_or_default(),
        dno: row.try_get::<Option<i64>, _>("dno")?.unwrap_or_default(),
        super_ssn: row.try_get("super_ssn")?,
    }))
}

/// The error is a unique or primary key violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// The error is a foreign key violation
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sqlite::fixtures::*;

    fn record(ssn: &str) -> EmployeeRecord {
        EmployeeRecord {
            ssn: ssn.to_string(),
            fname: "Alicia".to_string(),
            minit: "J".to_string(),
            lname: "Zelaya".to_string(),
            address: Some("3321 Castle, Spring, TX".to_string()),
            sex: Some(Sex::F),
            salary: 25000.0,
            dno: 4,
            super_ssn: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = memory_store().await;
        add_department(store.pool(), 4, "Administration", None).await;

        insert_employee(store.pool(), &record("999887777")).await.unwrap();

        let found = find_employee(store.pool(), "999887777").await.unwrap();
        assert_eq!(found, Some(record("999887777")));
        assert_eq!(find_employee(store.pool(), "000000000").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_ssn_is_unique_violation() {
        let store = memory_store().await;
        add_department(store.pool(), 4, "Administration", None).await;
        insert_employee(store.pool(), &record("999887777")).await.unwrap();

        let err = insert_employee(store.pool(), &record("999887777")).await.unwrap_err();
        assert!(is_unique_violation(&err));
        assert!(!is_foreign_key_violation(&err));
    }

    #[tokio::test]
    async fn test_update_leaves_unset_columns() {
        let store = memory_store().await;
        add_department(store.pool(), 4, "Administration", None).await;
        add_department(store.pool(), 5, "Research", None).await;
        insert_employee(store.pool(), &record("999887777")).await.unwrap();

        let changes = EmployeeChanges {
            address: Some("1 Main St".to_string()),
            salary: 30000.0,
            dno: 5,
            super_ssn: None,
            sex: None,
            minit: Some("K".to_string()),
        };
        assert!(update_employee(store.pool(), "999887777", &changes).await.unwrap());
        assert!(!update_employee(store.pool(), "000000000", &changes).await.unwrap());

        let found = find_employee(store.pool(), "999887777").await.unwrap().unwrap();
        assert_eq!(found.address.as_deref(), Some("1 Main St"));
        assert_eq!(found.salary, 30000.0);
        assert_eq!(found.dno, 5);
        assert_eq!(found.minit, "K");
        assert_eq!(found.sex, Some(Sex::F));
    }

    #[tokio::test]
    async fn test_delete_referenced_employee_is_foreign_key_violation() {
        let store = memory_store().await;
        add_department(store.pool(), 4, "Administration", None).await;
        insert_employee(store.pool(), &record("999887777")).await.unwrap();
        add_dependent(store.pool(), "999887777", "Alice").await;

        let err = delete_employee(store.pool(), "999887777").await.unwrap_err();
        assert!(is_foreign_key_violation(&err));

        assert!(!delete_employee(store.pool(), "000000000").await.unwrap());
    }
}
