//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::sync::Arc;

use crate::api::AppState;
use crate::auth::hash_password;
use crate::cli::{
    error, info, print_decision, print_identity_table, print_route_table, success, warn,
    OutputFormat,
};
use crate::config::{self, loader::CONFIG_FILENAME, Config};
use crate::identity::{Identity, IdentityDirectory, Role};
use crate::routing::RouteTable;

/// Initialize a new creatorhub.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Run 'creatorhub serve' to start the dashboard");

    Ok(())
}

/// Start the HTTP server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = config::load_config_or_default()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server on http://{}:{}", host, port));
    crate::api::run_server(config, &host, port).await?;
    Ok(())
}

/// List the seeded identities
pub async fn identities(role: Option<Role>, format: OutputFormat) -> Result<()> {
    let config = config::load_config_or_default()?;
    let directory = load_directory(&config)?;

    let identities: Vec<Arc<Identity>> = directory
        .iter()
        .filter(|identity| role.map_or(true, |role| identity.role() == role))
        .cloned()
        .collect();

    match format {
        OutputFormat::Table => print_identity_table(&identities),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&identities)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&identities)?;
            println!("{}", yaml);
        }
    }

    Ok(())
}

/// Show the destination table
pub async fn routes() -> Result<()> {
    print_route_table(&RouteTable::default());
    Ok(())
}

/// Attempt a login and report the outcome
pub async fn login(email: &str, password: &str) -> Result<()> {
    let state = AppState::from_config(config::load_config_or_default()?)?;

    if !state.session.login(email, password).await {
        error("Invalid credentials");
        anyhow::bail!("login failed");
    }

    let identity = state.session.require_identity().await?;
    success(&format!("Logged in as {} ({})", identity.name, identity.role()));
    info(&format!(
        "Home: {}",
        state.guard.table().role_home(identity.role()).path
    ));
    Ok(())
}

/// Print the guard decision for a path, optionally after logging in
pub async fn navigate(path: &str, as_email: Option<String>, password: &str) -> Result<()> {
    let state = AppState::from_config(config::load_config_or_default()?)?;

    if let Some(email) = as_email {
        if !state.session.login(&email, password).await {
            error("Invalid credentials");
            anyhow::bail!("login failed");
        }
        info(&format!("Session: {}", email));
    } else {
        info("Session: none");
    }

    let decision = state.guard.check(path, &state.session).await;
    print_decision(path, &decision);
    Ok(())
}

/// Print a bcrypt hash of a password
pub async fn hash(password: &str) -> Result<()> {
    println!("{}", hash_password(password)?);
    Ok(())
}

fn load_directory(config: &Config) -> Result<IdentityDirectory> {
    Ok(IdentityDirectory::load_or_builtin(config.directory.fixtures.as_deref())?)
}
