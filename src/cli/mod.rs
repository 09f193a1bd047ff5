//! CLI interface for CreatorHub

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

use crate::identity::Role;

#[derive(Parser)]
#[command(name = "creatorhub")]
#[command(version)]
#[command(about = "Session and role-based access for the CreatorHub dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new creatorhub.toml configuration file
    Init,

    /// Start the HTTP API server and web UI
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List the seeded identities
    Identities {
        /// Only show identities with this role
        #[arg(short, long)]
        role: Option<Role>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the destination table
    Routes,

    /// Try logging in with an email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Show what the route guard does for a path
    Navigate {
        /// Path to navigate to, e.g. /brand/dashboard
        path: String,

        /// Log in as this email first
        #[arg(long = "as")]
        as_email: Option<String>,

        /// Password for --as
        #[arg(long, default_value = "password")]
        password: String,
    },

    /// Print a bcrypt hash for use in an identity fixture
    HashPassword {
        password: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
