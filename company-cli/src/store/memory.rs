//! In-memory [`HoursStore`] that records every call

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;

use super::HoursStore;

/// A store call, in the order it was made
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    ProjectExists(i64),
    EmployeeExists(String),
    Upsert(String, i64, f64),
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: HashSet<i64>,
    employees: HashSet<String>,
    failing_ssns: HashSet<String>,
    failing_lookups: HashSet<String>,
    hours: Mutex<BTreeMap<(String, i64), f64>>,
    calls: Mutex<Vec<StoreCall>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project_id: i64) -> Self {
        self.projects.insert(project_id);
        self
    }

    pub fn with_employee(mut self, ssn: &str) -> Self {
        self.employees.insert(ssn.to_string());
        self
    }

    /// Make `upsert_hours` fail for `ssn`
    pub fn failing_upsert_for(mut self, ssn: &str) -> Self {
        self.failing_ssns.insert(ssn.to_string());
        self
    }

    /// Make `employee_exists` fail for `ssn`
    pub fn failing_lookup_for(mut self, ssn: &str) -> Self {
        self.failing_lookups.insert(ssn.to_string());
        self
    }

    pub fn hours(&self, ssn: &str, project_id: i64) -> Option<f64> {
        self.hours
            .lock()
            .unwrap()
            .get(&(ssn.to_string(), project_id))
            .copied()
    }

    pub fn record_count(&self) -> usize {
        self.hours.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn upserts(&self) -> Vec<(String, i64, f64)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Upsert(ssn, project, hours) => Some((ssn, project, hours)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl HoursStore for MemoryStore {
    async fn project_exists(&self, project_id: i64) -> Result<bool> {
        self.record(StoreCall::ProjectExists(project_id));
        Ok(self.projects.contains(&project_id))
    }

    async fn employee_exists(&self, ssn: &str) -> Result<bool> {
        self.record(StoreCall::EmployeeExists(ssn.to_string()));
        if self.failing_lookups.contains(ssn) {
            bail!("database is locked");
        }
        Ok(self.employees.contains(ssn))
    }

    async fn upsert_hours(&self, ssn: &str, project_id: i64, hours: f64) -> Result<()> {
        self.record(StoreCall::Upsert(ssn.to_string(), project_id, hours));
        if self.failing_ssns.contains(ssn) {
            bail!("connection reset by peer");
        }
        *self
            .hours
            .lock()
            .unwrap()
            .entry((ssn.to_string(), project_id))
            .or_insert(0.0) += hours;
        Ok(())
    }
}
