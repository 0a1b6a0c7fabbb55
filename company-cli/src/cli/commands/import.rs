//! Import and template command handlers

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use super::AppContext;
use crate::auth::Role;
use crate::cli::{ImportCommands, OutputFormat, TemplateCommands};
use crate::import::{ImportOutcome, ImportSummary, template_file_name, template_workbook};
use crate::services::{Upload, import_project_hours};

/// Handle `import`: read the file and run it through the import service
pub async fn handle_import_command(ctx: &AppContext, args: ImportCommands) -> Result<()> {
    let upload = read_upload(&args.file)?;

    let outcome = import_project_hours(&ctx.store, &ctx.config.actor, args.project, upload)
        .await
        .map_err(|err| anyhow::anyhow!("{}", err))?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .context("Failed to serialize import result")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_summary(&outcome, args.project, ctx.config.import.error_preview),
    }

    Ok(())
}

/// A missing file becomes "no upload"; the service reports it
fn read_upload(path: &Path) -> Result<Option<Upload>> {
    if !path.exists() {
        log::debug!("Upload path does not exist: {}", path.display());
        return Ok(None);
    }

    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Some(Upload::new(filename, bytes)))
}

fn print_summary(outcome: &ImportOutcome, project_id: i64, preview_limit: usize) {
    let summary = ImportSummary::render(outcome, project_id, preview_limit);

    if let Some(imported) = &summary.imported {
        println!("{}", imported.green());
    }
    if let Some(skipped) = &summary.skipped {
        println!("{}", skipped.yellow());
    }
    if outcome.rows_seen() == 0 {
        println!("{}", "No data rows found.".dimmed());
    }
}

/// Handle `template`: write the example workbook
pub fn handle_template_command(ctx: &AppContext, args: TemplateCommands) -> Result<()> {
    ctx.config
        .actor
        .require(Role::Admin)
        .map_err(|err| anyhow::anyhow!("{}", err))?;

    let output = args
        .output
        .unwrap_or_else(|| template_file_name(args.project).into());

    let bytes = template_workbook()?;
    fs::write(&output, bytes)
        .with_context(|| format!("Failed to write template: {}", output.display()))?;

    log::info!("Template written to: {}", output.display());
    println!("Template written to {}", output.display().to_string().cyan());
    Ok(())
}
