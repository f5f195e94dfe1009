use std::{io::Write, sync::Arc};

use clap::Parser;
use engine::{Engine, SystemClock};
use migration::{Migrator, MigratorTrait};

use crate::{
    error::Result,
    scope::{LogErrors, TaskScope},
    settings::Settings,
};

mod cli;
mod commands;
mod error;
mod scope;
mod settings;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = cli::Cli::parse();
    let mut settings = Settings::new(cli.config.as_deref())?;
    if let Some(level) = cli.level {
        settings.app.level = level;
    }
    if let Some(timezone) = cli.timezone {
        settings.app.timezone = Some(timezone);
    }

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "flosyn={level},engine={level},migration={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let database_url = cli
        .database_url
        .unwrap_or_else(|| settings.database.url());
    let clock = SystemClock::new(settings.timezone()?);
    tracing::debug!(%database_url, timezone = ?clock.timezone(), "starting");

    let command = cli.command;
    let mut scope = TaskScope::new(LogErrors);
    scope.launch(async move {
        let engine = connect_engine(&database_url, clock).await?;
        let output = commands::run(command, &engine).await?;
        writeln!(std::io::stdout().lock(), "{output}")?;
        Ok::<(), error::AppError>(())
    });

    if !scope.join().await {
        std::process::exit(1);
    }
    Ok(())
}

async fn connect_engine(database_url: &str, clock: SystemClock) -> Result<Engine> {
    let database = sea_orm::Database::connect(database_url).await?;
    Migrator::up(&database, None).await?;
    let engine = Engine::builder()
        .database(database)
        .clock(Arc::new(clock))
        .build()
        .await?;
    Ok(engine)
}
