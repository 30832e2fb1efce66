//! Combined binary for development - runs both services in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::MigrateAction;

#[derive(Parser)]
#[command(name = "catalog-platform")]
#[command(about = "Combined auth and product services for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run both services in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "8081")]
        auth_port: u16,
        #[arg(long, default_value = "8082")]
        product_port: u16,
    },
    /// Run database migrations for both services
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateCommands> for MigrateAction {
    fn from(command: MigrateCommands) -> Self {
        match command {
            MigrateCommands::Up => MigrateAction::Up,
            MigrateCommands::Down => MigrateAction::Down,
            MigrateCommands::Status => MigrateAction::Status,
            MigrateCommands::Fresh => MigrateAction::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            auth_port,
            product_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  Auth service:    http://{}:{}", host, auth_port);
            info!("  Product service: http://{}:{}", host, product_port);

            let auth_host = host.clone();
            let auth_handle = tokio::spawn(async move {
                if let Err(e) = auth_service_lib::run_embedded(&auth_host, auth_port).await {
                    error!("Auth service failed: {}", e);
                }
            });

            let product_host = host.clone();
            let product_handle = tokio::spawn(async move {
                if let Err(e) = product_service_lib::run_embedded(&product_host, product_port).await
                {
                    error!("Product service failed: {}", e);
                }
            });

            // Either service exiting means something went wrong
            tokio::select! {
                _ = auth_handle => {
                    error!("Auth service exited unexpectedly");
                }
                _ = product_handle => {
                    error!("Product service exited unexpectedly");
                }
            }
        }
        Commands::Migrate { action } => {
            auth_service_lib::run_migrations(action.into()).await?;
            product_service_lib::run_migrations(action.into()).await?;
        }
    }

    Ok(())
}
