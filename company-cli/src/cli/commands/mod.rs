//! Command handlers

pub mod employees;
pub mod hours;
pub mod import;
pub mod reports;

use anyhow::Result;

use super::{Cli, Commands};
use crate::config::Config;
use crate::store::{self, SqliteStore};

/// Everything a handler needs: configuration and an open store
pub struct AppContext {
    pub config: Config,
    pub store: SqliteStore,
}

impl AppContext {
    /// Load configuration and open the database, applying migrations
    pub async fn open(cli: &Cli) -> Result<Self> {
        let mut config = Config::load(cli.config.as_deref())?;
        if let Some(url) = &cli.database_url {
            config.database_url = url.clone();
        }

        log::debug!("Opening database {}", config.database_url);
        let pool = store::connect(&config.database_url).await?;
        store::migrate(&pool).await?;

        Ok(Self {
            config,
            store: SqliteStore::new(pool),
        })
    }
}

/// Run the parsed command
pub async fn dispatch(cli: Cli) -> Result<()> {
    let ctx = AppContext::open(&cli).await?;

    match cli.command {
        Commands::Import(args) => import::handle_import_command(&ctx, args).await,
        Commands::Template(args) => import::handle_template_command(&ctx, args),
        Commands::RecordHours(args) => hours::handle_record_hours_command(&ctx, args).await,
        Commands::Employees(args) => reports::handle_employees_command(&ctx, args).await,
        Commands::Employee(args) => employees::handle_employee_command(&ctx, args.command).await,
        Commands::Managers => reports::handle_managers_command(&ctx).await,
        Commands::Projects(args) => reports::handle_projects_command(&ctx, args).await,
        Commands::Project(args) => reports::handle_project_command(&ctx, args).await,
    }
}
