//! Read-only report queries over the company schema

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// One line of the employee overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeSummary {
    pub ssn: String,
    pub full_name: String,
    pub dept_name: Option<String>,
    pub num_dependents: i64,
    pub num_projects: i64,
    pub total_hours: f64,
}

/// One line of the manager overview, per department
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerSummary {
    pub manager_name: Option<String>,
    pub dept_name: String,
    pub headcount: i64,
    pub total_hours: f64,
}

/// Hours one employee has recorded on a project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectAssignment {
    pub ssn: String,
    pub employee: String,
    pub hours: f64,
}

/// One line of the projects overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub pnumber: i64,
    pub pname: String,
    pub dept_name: Option<String>,
    pub headcount: i64,
    pub total_hours: f64,
}

/// Allowed orderings for the employee overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmployeeSort {
    #[default]
    NameAsc,
    NameDesc,
    HoursAsc,
    HoursDesc,
}

impl EmployeeSort {
    fn order_by(self) -> &'static str {
        match self {
            EmployeeSort::NameAsc => "full_name ASC",
            EmployeeSort::NameDesc => "full_name DESC",
            EmployeeSort::HoursAsc => "total_hours ASC, full_name ASC",
            EmployeeSort::HoursDesc => "total_hours DESC, full_name ASC",
        }
    }
}

/// Allowed orderings for the projects overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectSort {
    HeadcountAsc,
    #[default]
    HeadcountDesc,
    HoursAsc,
    HoursDesc,
}

impl ProjectSort {
    fn order_by(self) -> &'static str {
        match self {
            ProjectSort::HeadcountAsc => "headcount ASC, p.pnumber ASC",
            ProjectSort::HeadcountDesc => "headcount DESC, p.pnumber ASC",
            ProjectSort::HoursAsc => "total_hours ASC, p.pnumber ASC",
            ProjectSort::HoursDesc => "total_hours DESC, p.pnumber ASC",
        }
    }
}

/// Filters for the employee overview
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub dept: Option<i64>,
    pub search: Option<String>,
    pub sort: EmployeeSort,
}

/// Result of sanitising a user-typed department number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeptInput {
    pub dept: Option<i64>,
    pub warning: Option<&'static str>,
}

/// Accept only a digit string as a department filter
///
/// Blank input means "no filter". Anything else that is not a number is
/// dropped with a warning for the user.
pub fn parse_dept_input(raw: Option<&str>) -> DeptInput {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return DeptInput { dept: None, warning: None };
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(dept) = trimmed.parse::<i64>() {
            return DeptInput { dept: Some(dept), warning: None };
        }
    }

    DeptInput {
        dept: None,
        warning: Some("Dept # must be a number."),
    }
}

/// Employees with department, dependent count, project count and total hours
pub async fn employee_summaries(pool: &SqlitePool, filter: &EmployeeFilter) -> Result<Vec<EmployeeSummary>> {
    let mut sql = String::from(
        r#"
        WITH dep AS (
            SELECT essn, COUNT(*) AS dep_count FROM dependent GROUP BY essn
        ), w AS (
            SELECT essn, COUNT(DISTINCT pno) AS num_projects, COALESCE(SUM(hours), 0) AS total_hours
            FROM works_on GROUP BY essn
        )
        SELECT
            e.ssn,
            (e.fname || ' ' || e.lname) AS full_name,
            d.dname AS dept_name,
            COALESCE(dep.dep_count, 0) AS num_dependents,
            COALESCE(w.num_projects, 0) AS num_projects,
            CAST(COALESCE(w.total_hours, 0) AS REAL) AS total_hours
        FROM employee e
        LEFT JOIN department d ON d.dnumber = e.dno
        LEFT JOIN dep ON dep.essn = e.ssn
        LEFT JOIN w ON w.essn = e.ssn
        "#,
    );

    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut conditions = Vec::new();
    if filter.dept.is_some() {
        conditions.push("e.dno = ?");
    }
    if search.is_some() {
        conditions.push("LOWER(e.fname || ' ' || e.lname) LIKE '%' || LOWER(?) || '%'");
    }
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY ");
    sql.push_str(filter.sort.order_by());

    let mut query = sqlx::query(&sql);
    if let Some(dept) = filter.dept {
        query = query.bind(dept);
    }
    if let Some(search) = search {
        query = query.bind(search.to_string());
    }

    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to list employees")?;

    let mut summaries = Vec::with_capacity(rows.len());
    for row in rows {
        summaries.push(EmployeeSummary {
            ssn: row.try_get("ssn")?,
            full_name: row.try_get("full_name")?,
            dept_name: row.try_get("dept_name")?,
            num_dependents: row.try_get("num_dependents")?,
            num_projects: row.try_get("num_projects")?,
            total_hours: row.try_get("total_hours")?,
        });
    }

    Ok(summaries)
}

/// Per department: manager, headcount and total hours worked by its staff
pub async fn manager_summaries(pool: &SqlitePool) -> Result<Vec<ManagerSummary>> {
    let rows = sqlx::query(
        r#"
        WITH emp_counts AS (
            SELECT dno, COUNT(*) AS emp_count
            FROM employee
            GROUP BY dno
        ),
        dept_hours AS (
            SELECT e.dno, COALESCE(SUM(w.hours), 0) AS total_hours
            FROM employee e
            LEFT JOIN works_on w ON w.essn = e.ssn
            GROUP BY e.dno
        )
        SELECT
            (mgr.fname || ' ' || mgr.lname) AS manager_name,
            d.dname AS dept_name,
            COALESCE(emp_counts.emp_count, 0) AS headcount,
            CAST(COALESCE(dept_hours.total_hours, 0) AS REAL) AS total_hours
        FROM department d
        LEFT JOIN employee mgr ON mgr.ssn = d.mgr_ssn
        LEFT JOIN emp_counts ON emp_counts.dno = d.dnumber
        LEFT JOIN dept_hours ON dept_hours.dno = d.dnumber
        ORDER BY d.dname
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to build manager summary")?;

    let mut summaries = Vec::with_capacity(rows.len());
    for row in rows {
        summaries.push(ManagerSummary {
            manager_name: row.try_get("manager_name")?,
            dept_name: row.try_get("dept_name")?,
            headcount: row.try_get("headcount")?,
            total_hours: row.try_get("total_hours")?,
        });
    }

    Ok(summaries)
}

/// Every project with its department, distinct headcount and total hours
pub async fn project_summaries(pool: &SqlitePool, sort: ProjectSort) -> Result<Vec<ProjectSummary>> {
    let sql = format!(
        r#"
        WITH stats AS (
            SELECT pno, COUNT(DISTINCT essn) AS headcount, COALESCE(SUM(hours), 0) AS total_hours
            FROM works_on GROUP BY pno
        )
        SELECT
            p.pnumber,
            p.pname,
            d.dname AS dept_name,
            COALESCE(stats.headcount, 0) AS headcount,
            CAST(COALESCE(stats.total_hours, 0) AS REAL) AS total_hours
        FROM project p
        LEFT JOIN department d ON d.dnumber = p.dnum
        LEFT JOIN stats ON stats.pno = p.pnumber
        ORDER BY {}
        "#,
        sort.order_by()
    );

    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .context("Failed to list projects")?;

    let mut summaries = Vec::with_capacity(rows.len());
    for row in rows {
        summaries.push(ProjectSummary {
            pnumber: row.try_get("pnumber")?,
            pname: row.try_get("pname")?,
            dept_name: row.try_get("dept_name")?,
            headcount: row.try_get("headcount")?,
            total_hours: row.try_get("total_hours")?,
        });
    }

    Ok(summaries)
}

/// Employees with recorded hours on `project_id`, ordered by name
pub async fn project_assignments(pool: &SqlitePool, project_id: i64) -> Result<Vec<ProjectAssignment>> {
    let rows = sqlx::query(
        r#"
        SELECT
            e.ssn AS ssn,
            (e.fname || ' ' || e.lname) AS employee,
            w.hours AS hours
        FROM works_on w
        JOIN employee e ON e.ssn = w.essn
        WHERE w.pno = ?
        ORDER BY employee
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("Failed to list assignments for project {}", project_id))?;

    let mut assignments = Vec::with_capacity(rows.len());
    for row in rows {
        assignments.push(ProjectAssignment {
            ssn: row.try_get("ssn")?,
            employee: row.try_get("employee")?,
            hours: row.try_get("hours")?,
        });
    }

    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HoursStore;
    use crate::store::sqlite::fixtures::*;

    async fn seeded() -> crate::store::SqliteStore {
        let store = memory_store().await;
        let pool = store.pool();
        add_department(pool, 1, "Headquarters", Some("888665555")).await;
        add_department(pool, 5, "Research", Some("333445555")).await;
        add_employee(pool, "888665555", "James", "Borg", Some(1)).await;
        add_employee(pool, "333445555", "Franklin", "Wong", Some(5)).await;
        add_employee(pool, "123456789", "John", "Smith", Some(5)).await;
        add_employee(pool, "453453453", "Joyce", "English", None).await;
        add_project(pool, 1, "ProductX", Some(5)).await;
        add_project(pool, 2, "ProductY", Some(5)).await;
        add_dependent(pool, "333445555", "Alice").await;
        add_dependent(pool, "333445555", "Theodore").await;

        store.upsert_hours("123456789", 1, 32.5).await.unwrap();
        store.upsert_hours("123456789", 2, 7.5).await.unwrap();
        store.upsert_hours("333445555", 2, 10.0).await.unwrap();
        store
    }

    #[test]
    fn test_parse_dept_input() {
        assert_eq!(parse_dept_input(None), DeptInput { dept: None, warning: None });
        assert_eq!(parse_dept_input(Some("  ")), DeptInput { dept: None, warning: None });
        assert_eq!(parse_dept_input(Some(" 5 ")), DeptInput { dept: Some(5), warning: None });
        assert_eq!(
            parse_dept_input(Some("five")),
            DeptInput { dept: None, warning: Some("Dept # must be a number.") }
        );
        assert_eq!(parse_dept_input(Some("-1")).dept, None);
    }

    #[tokio::test]
    async fn test_employee_summaries_aggregate() {
        let store = seeded().await;
        let rows = employee_summaries(store.pool(), &EmployeeFilter::default()).await.unwrap();

        let names: Vec<_> = rows.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["Franklin Wong", "James Borg", "John Smith", "Joyce English"]);

        let john = &rows[2];
        assert_eq!(john.dept_name.as_deref(), Some("Research"));
        assert_eq!(john.num_projects, 2);
        assert_eq!(john.total_hours, 40.0);
        assert_eq!(john.num_dependents, 0);

        let franklin = &rows[0];
        assert_eq!(franklin.num_dependents, 2);

        let joyce = &rows[3];
        assert_eq!(joyce.dept_name, None);
        assert_eq!(joyce.total_hours, 0.0);
    }

    #[tokio::test]
    async fn test_employee_summaries_filter_and_sort() {
        let store = seeded().await;

        let filter = EmployeeFilter {
            dept: Some(5),
            search: None,
            sort: EmployeeSort::HoursDesc,
        };
        let rows = employee_summaries(store.pool(), &filter).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["John Smith", "Franklin Wong"]);

        let filter = EmployeeFilter {
            dept: None,
            search: Some("  SMITH ".to_string()),
            sort: EmployeeSort::NameDesc,
        };
        let rows = employee_summaries(store.pool(), &filter).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ssn, "123456789");
    }

    #[tokio::test]
    async fn test_manager_summaries() {
        let store = seeded().await;
        let rows = manager_summaries(store.pool()).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].dept_name, "Headquarters");
        assert_eq!(rows[0].manager_name.as_deref(), Some("James Borg"));
        assert_eq!(rows[0].headcount, 1);
        assert_eq!(rows[0].total_hours, 0.0);

        assert_eq!(rows[1].dept_name, "Research");
        assert_eq!(rows[1].manager_name.as_deref(), Some("Franklin Wong"));
        assert_eq!(rows[1].headcount, 2);
        assert_eq!(rows[1].total_hours, 50.0);
    }

    #[tokio::test]
    async fn test_project_summaries_totals() {
        let store = seeded().await;
        add_project(store.pool(), 3, "Reorganization", None).await;

        let rows = project_summaries(store.pool(), ProjectSort::default()).await.unwrap();

        assert_eq!(
            rows,
            vec![
                ProjectSummary {
                    pnumber: 2,
                    pname: "ProductY".to_string(),
                    dept_name: Some("Research".to_string()),
                    headcount: 2,
                    total_hours: 17.5,
                },
                ProjectSummary {
                    pnumber: 1,
                    pname: "ProductX".to_string(),
                    dept_name: Some("Research".to_string()),
                    headcount: 1,
                    total_hours: 32.5,
                },
                ProjectSummary {
                    pnumber: 3,
                    pname: "Reorganization".to_string(),
                    dept_name: None,
                    headcount: 0,
                    total_hours: 0.0,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_project_summaries_sort_orders() {
        let store = seeded().await;
        add_project(store.pool(), 3, "Reorganization", None).await;

        let order = |rows: Vec<ProjectSummary>| rows.iter().map(|r| r.pnumber).collect::<Vec<_>>();

        let rows = project_summaries(store.pool(), ProjectSort::HeadcountAsc).await.unwrap();
        assert_eq!(order(rows), vec![3, 1, 2]);

        let rows = project_summaries(store.pool(), ProjectSort::HoursAsc).await.unwrap();
        assert_eq!(order(rows), vec![3, 2, 1]);

        let rows = project_summaries(store.pool(), ProjectSort::HoursDesc).await.unwrap();
        assert_eq!(order(rows), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_project_assignments() {
        let store = seeded().await;
        let rows = project_assignments(store.pool(), 2).await.unwrap();

        assert_eq!(
            rows,
            vec![
                ProjectAssignment {
                    ssn: "333445555".to_string(),
                    employee: "Franklin Wong".to_string(),
                    hours: 10.0,
                },
                ProjectAssignment {
                    ssn: "123456789".to_string(),
                    employee: "John Smith".to_string(),
                    hours: 7.5,
                },
            ]
        );
        assert!(project_assignments(store.pool(), 99).await.unwrap().is_empty());
    }
}
