//! SQLite repository for work assignments

use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::HoursStore;

/// Open a connection pool for `database_url`, creating the file if needed
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database URL: {}", database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }
    }

    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to database: {}", database_url))
}

/// Apply the embedded schema migrations
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(())
}

/// [`HoursStore`] backed by the `project`, `employee` and `works_on` tables
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl HoursStore for SqliteStore {
    async fn project_exists(&self, project_id: i64) -> Result<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM project WHERE pnumber = ? LIMIT 1")
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to look up project")?;

        Ok(found.is_some())
    }

    async fn employee_exists(&self, ssn: &str) -> Result<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM employee WHERE ssn = ? LIMIT 1")
            .bind(ssn)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to look up employee")?;

        Ok(found.is_some())
    }

    async fn upsert_hours(&self, ssn: &str, project_id: i64, hours: f64) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO works_on (essn, pno, hours)
            VALUES (?, ?, ?)
            ON CONFLICT(essn, pno)
            DO UPDATE SET hours = works_on.hours + excluded.hours
            "#,
        )
        .bind(ssn)
        .bind(project_id)
        .bind(hours)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to record hours for {} on project {}", ssn, project_id))?;

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[tokio::test]
    async fn test_existence_checks() {
        let store = memory_store().await;
        add_employee(store.pool(), "123456789", "John", "Smith", None).await;
        add_project(store.pool(), 1, "ProductX", None).await;

        assert!(store.project_exists(1).await.unwrap());
        assert!(!store.project_exists(2).await.unwrap());
        assert!(store.employee_exists("123456789").await.unwrap());
        assert!(!store.employee_exists("999999999").await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_adds_to_existing_hours() {
        let store = memory_store().await;
        add_employee(store.pool(), "123456789", "John", "Smith", None).await;
        add_project(store.pool(), 1, "ProductX", None).await;

        store.upsert_hours("123456789", 1, 5.0).await.unwrap();
        assert_eq!(hours_for(store.pool(), "123456789", 1).await, Some(5.0));

        store.upsert_hours("123456789", 1, 3.0).await.unwrap();
        assert_eq!(hours_for(store.pool(), "123456789", 1).await, Some(8.0));
        assert_eq!(assignment_count(store.pool()).await, 1);
    }

    #[tokio::test]
    async fn test_upsert_unknown_employee_fails() {
        let store = memory_store().await;
        add_project(store.pool(), 1, "ProductX", None).await;

        let err = store.upsert_hours("000000000", 1, 2.0).await.unwrap_err();
        assert!(err.to_string().contains("Failed to record hours"));
        assert_eq!(assignment_count(store.pool()).await, 0);
    }
}
