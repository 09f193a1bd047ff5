//! CreatorHub - session and role-based access for the marketing dashboard
//!
//! A single process-wide [`auth::SessionStore`] holds the signed-in
//! identity, and a [`routing::RouteGuard`] decides for every navigation
//! whether to render the requested page, send the visitor to the login page,
//! or send them to their role's home page.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod routing;
pub mod ui;

pub use auth::{Session, SessionStore};
pub use config::Config;
pub use error::Error;
pub use identity::{Identity, IdentityDirectory, Role};
pub use routing::{GuardDecision, RouteGuard, RouteTable};
