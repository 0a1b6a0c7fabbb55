//! Report command handlers: employees, managers, projects, project hours

use anyhow::{Result, bail};
use colored::*;

use super::AppContext;
use crate::cli::{EmployeesCommands, ProjectCommands, ProjectsCommands};
use crate::export::export_employees_csv;
use crate::store::HoursStore;
use crate::store::reports::{
    EmployeeFilter, EmployeeSummary, employee_summaries, manager_summaries, parse_dept_input,
    project_assignments, project_summaries,
};

pub async fn handle_employees_command(ctx: &AppContext, args: EmployeesCommands) -> Result<()> {
    let dept = parse_dept_input(args.dept.as_deref());
    if let Some(warning) = dept.warning {
        eprintln!("{}", warning.yellow());
    }

    let filter = EmployeeFilter {
        dept: dept.dept,
        search: args.search,
        sort: args.sort.into(),
    };
    let rows = employee_summaries(ctx.store.pool(), &filter).await?;

    if let Some(path) = args.csv {
        export_employees_csv(&rows, &path)?;
        println!(
            "Exported {} employee(s) to {}",
            rows.len(),
            path.display().to_string().cyan()
        );
        return Ok(());
    }

    print_employees(&rows);
    Ok(())
}

fn print_employees(rows: &[EmployeeSummary]) {
    if rows.is_empty() {
        println!("{}", "No employees found.".dimmed());
        return;
    }

    println!(
        "{:<12} {:<28} {:<20} {:>5} {:>5} {:>10}",
        "SSN".bold(),
        "Name".bold(),
        "Department".bold(),
        "Deps".bold(),
        "Proj".bold(),
        "Hours".bold()
    );
    for row in rows {
        println!(
            "{:<12} {:<28} {:<20} {:>5} {:>5} {:>10.2}",
            row.ssn,
            row.full_name,
            row.dept_name.as_deref().unwrap_or("N/A"),
            row.num_dependents,
            row.num_projects,
            row.total_hours
        );
    }
}

pub async fn handle_managers_command(ctx: &AppContext) -> Result<()> {
    let rows = manager_summaries(ctx.store.pool()).await?;

    if rows.is_empty() {
        println!("{}", "No departments found.".dimmed());
        return Ok(());
    }

    println!(
        "{:<28} {:<20} {:>9} {:>10}",
        "Manager".bold(),
        "Department".bold(),
        "Headcount".bold(),
        "Hours".bold()
    );
    for row in rows {
        println!(
            "{:<28} {:<20} {:>9} {:>10.2}",
            row.manager_name.as_deref().unwrap_or("-"),
            row.dept_name,
            row.headcount,
            row.total_hours
        );
    }
    Ok(())
}

pub async fn handle_projects_command(ctx: &AppContext, args: ProjectsCommands) -> Result<()> {
    let rows = project_summaries(ctx.store.pool(), args.sort.into()).await?;

    if rows.is_empty() {
        println!("{}", "No projects found.".dimmed());
        return Ok(());
    }

    println!(
        "{:>6} {:<24} {:<20} {:>9} {:>10}",
        "#".bold(),
        "Project".bold(),
        "Department".bold(),
        "Headcount".bold(),
        "Hours".bold()
    );
    for row in rows {
        println!(
            "{:>6} {:<24} {:<20} {:>9} {:>10.2}",
            row.pnumber,
            row.pname,
            row.dept_name.as_deref().unwrap_or("N/A"),
            row.headcount,
            row.total_hours
        );
    }
    Ok(())
}

pub async fn handle_project_command(ctx: &AppContext, args: ProjectCommands) -> Result<()> {
    if !ctx.store.project_exists(args.project).await? {
        bail!("Project not found.");
    }

    let rows = project_assignments(ctx.store.pool(), args.project).await?;

    println!("{}", format!("Project {}", args.project).bold());
    if rows.is_empty() {
        println!("{}", "No hours recorded.".dimmed());
        return Ok(());
    }

    for row in &rows {
        println!("{:<12} {:<28} {:>10.2}", row.ssn, row.employee, row.hours);
    }
    let total: f64 = rows.iter().map(|row| row.hours).sum();
    println!("{:<41} {:>10.2}", "Total".bold(), total);
    Ok(())
}
