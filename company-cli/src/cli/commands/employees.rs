//! Employee maintenance handlers

use anyhow::{Result, bail};
use colored::*;

use super::AppContext;
use crate::cli::{EmployeeAddCommands, EmployeeCommands, EmployeeEditCommands};
use crate::services::{
    EMPLOYEE_ADDED, EMPLOYEE_DELETED, EMPLOYEE_UPDATED, EditEmployeeForm, NewEmployeeForm,
    create_employee, edit_employee, remove_employee,
};
use crate::store::employees::find_employee;

pub async fn handle_employee_command(ctx: &AppContext, command: EmployeeCommands) -> Result<()> {
    match command {
        EmployeeCommands::Add(args) => add(ctx, args).await,
        EmployeeCommands::Edit(args) => edit(ctx, args).await,
        EmployeeCommands::Delete { ssn } => {
            remove_employee(ctx.store.pool(), &ctx.config.actor, &ssn)
                .await
                .map_err(|err| anyhow::anyhow!("{}", err))?;
            println!("{}", EMPLOYEE_DELETED.green());
            Ok(())
        }
        EmployeeCommands::Show { ssn } => show(ctx, &ssn).await,
    }
}

async fn add(ctx: &AppContext, args: EmployeeAddCommands) -> Result<()> {
    let form = NewEmployeeForm {
        ssn: args.ssn,
        fname: args.fname,
        minit: args.minit,
        lname: args.lname,
        address: args.address,
        sex: args.sex.map(Into::into),
        salary: args.salary,
        dno: args.dno,
        super_ssn: args.super_ssn,
    };

    create_employee(ctx.store.pool(), &ctx.config.actor, form)
        .await
        .map_err(|err| anyhow::anyhow!("{}", err))?;
    println!("{}", EMPLOYEE_ADDED.green());
    Ok(())
}

async fn edit(ctx: &AppContext, args: EmployeeEditCommands) -> Result<()> {
    let form = EditEmployeeForm {
        address: args.address,
        salary: args.salary,
        dno: args.dno,
        super_ssn: args.super_ssn,
        sex: args.sex.map(Into::into),
        minit: args.minit,
    };

    edit_employee(ctx.store.pool(), &ctx.config.actor, &args.ssn, form)
        .await
        .map_err(|err| anyhow::anyhow!("{}", err))?;
    println!("{}", EMPLOYEE_UPDATED.green());
    Ok(())
}

async fn show(ctx: &AppContext, ssn: &str) -> Result<()> {
    let Some(employee) = find_employee(ctx.store.pool(), ssn.trim()).await? else {
        bail!("No such employee SSN.");
    };

    println!("{} {} {} ({})", employee.fname, employee.minit, employee.lname, employee.ssn.bold());
    println!("  Address:    {}", employee.address.as_deref().unwrap_or("-"));
    println!("  Sex:        {}", employee.sex.map(|s| s.as_str()).unwrap_or("-"));
    println!("  Salary:     {:.2}", employee.salary);
    println!("  Dept #:     {}", employee.dno);
    println!("  Supervisor: {}", employee.super_ssn.as_deref().unwrap_or("-"));
    Ok(())
}
