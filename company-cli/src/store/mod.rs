//! Data store for the company schema
//!
//! The import pipeline only talks to [`HoursStore`]. The SQLite repository
//! implements it; report queries live next to it in [`reports`].

pub mod employees;
pub mod reports;
pub mod sqlite;

#[cfg(test)]
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

pub use sqlite::{SqliteStore, connect, migrate};

/// Operations the hours import depends on
///
/// Each call is atomic and durable once it returns `Ok`.
#[async_trait]
pub trait HoursStore: Send + Sync {
    async fn project_exists(&self, project_id: i64) -> Result<bool>;

    async fn employee_exists(&self, ssn: &str) -> Result<bool>;

    /// Add `hours` to the `(ssn, project_id)` assignment, creating it if absent
    async fn upsert_hours(&self, ssn: &str, project_id: i64, hours: f64) -> Result<()>;
}
