use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use creatorhub::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "creatorhub=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Serve { host, port } => cli::commands::serve(host, port).await,
        Commands::Identities { role, format } => cli::commands::identities(role, format).await,
        Commands::Routes => cli::commands::routes().await,
        Commands::Login { email, password } => cli::commands::login(&email, &password).await,
        Commands::Navigate {
            path,
            as_email,
            password,
        } => cli::commands::navigate(&path, as_email, &password).await,
        Commands::HashPassword { password } => cli::commands::hash(&password).await,
    }
}
