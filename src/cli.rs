use clap::{Parser, Subcommand};

use crate::app::app;
use crate::config::AppConfig;
use crate::database;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "mygram-api")]
#[command(about = "MyGram API - photo sharing backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Apply database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    tracing::info!("Loaded {:?} configuration", config.environment);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Migrate => {
            let pool = database::connect(&config.database)?;
            database::run_migrations(&pool).await?;
            tracing::info!("Migrations applied");
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let pool = database::connect(&config.database)?;

    if config.database.run_migrations {
        database::run_migrations(&pool).await?;
    }

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let state = AppState::new(config, pool);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("MyGram API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["mygram-api"]).unwrap();
        assert_eq!(cli.command, None);

        let cli = Cli::try_parse_from(["mygram-api", "migrate"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Migrate));
    }
}
