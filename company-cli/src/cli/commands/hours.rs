use anyhow::Result;
use colored::*;

use super::AppContext;
use crate::cli::RecordHoursCommands;
use crate::services::{HOURS_RECORDED, record_hours};

pub async fn handle_record_hours_command(ctx: &AppContext, args: RecordHoursCommands) -> Result<()> {
    let hours = record_hours(
        &ctx.store,
        &ctx.config.actor,
        args.project,
        &args.ssn,
        &args.hours,
    )
    .await
    .map_err(|err| anyhow::anyhow!("{}", err))?;

    println!(
        "{} ({} h for {} on project {})",
        HOURS_RECORDED.green(),
        hours,
        args.ssn.trim(),
        args.project
    );
    Ok(())
}
