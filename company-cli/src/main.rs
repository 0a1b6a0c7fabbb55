mod auth;
mod cli;
mod config;
mod export;
mod import;
mod services;
mod store;

use anyhow::Result;
use clap::Parser;
use colored::*;

use cli::Cli;

// Imports run row by row against the store; one thread is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(err) = cli::commands::dispatch(cli).await {
        log::error!("{:#}", err);
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }

    Ok(())
}
