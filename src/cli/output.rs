//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::sync::Arc;

use crate::identity::{AccountStatus, Identity, Profile, Role};
use crate::routing::{Access, GuardDecision, RouteTable};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn role_color(role: Role) -> Color {
    match role {
        Role::Admin => Color::Magenta,
        Role::Brand => Color::Blue,
        Role::Creator => Color::Green,
    }
}

/// One-line summary of the role-specific fields
fn profile_summary(identity: &Identity) -> String {
    match identity.profile() {
        Profile::Admin => "-".to_string(),
        Profile::Brand(brand) => format!("{} ({})", brand.company_name, brand.industry),
        Profile::Creator(creator) => format!(
            "{} | {} followers | ★ {:.1}",
            creator.niches.join(", "),
            creator.total_followers(),
            creator.rating
        ),
    }
}

/// Print a table of identities
pub fn print_identity_table(identities: &[Arc<Identity>]) {
    if identities.is_empty() {
        info("No identities found");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Email").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Role").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
            Cell::new("Profile").fg(Color::Cyan),
        ]);

    for identity in identities {
        let status_color = match identity.status {
            AccountStatus::Active => Color::Green,
            AccountStatus::Blocked => Color::Red,
        };

        table.add_row(vec![
            Cell::new(&identity.email),
            Cell::new(&identity.name),
            Cell::new(identity.role()).fg(role_color(identity.role())),
            Cell::new(identity.status).fg(status_color),
            Cell::new(profile_summary(identity)),
        ]);
    }

    println!("{table}");
}

/// Print the destination table
pub fn print_route_table(routes: &RouteTable) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Path").fg(Color::Cyan),
            Cell::new("Access").fg(Color::Cyan),
            Cell::new("Home of").fg(Color::Cyan),
        ]);

    for destination in routes.iter() {
        let access = match destination.access {
            Access::Root => Cell::new("root"),
            Access::Public => Cell::new("public"),
            Access::Protected(role) => Cell::new(role).fg(role_color(role)),
        };
        let home_of = Role::ALL
            .iter()
            .find(|role| routes.role_home(**role).name == destination.name)
            .map(|role| role.to_string())
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(&destination.name),
            Cell::new(&destination.path),
            access,
            Cell::new(home_of),
        ]);
    }

    println!("{table}");
}

/// Print a guard decision
pub fn print_decision(path: &str, decision: &GuardDecision) {
    match decision {
        GuardDecision::Render { destination } => {
            success(&format!("{} renders {}", path, destination.name.bold()));
        }
        GuardDecision::RedirectToLogin { to, from } => {
            warn(&format!("{} redirects to login at {}", path, to.bold()));
            if let Some(from) = from {
                info(&format!("Requested path remembered: {}", from));
            }
        }
        GuardDecision::RedirectToRoleHome { role, to } => {
            warn(&format!("{} redirects to the {} home at {}", path, role, to.bold()));
        }
    }
}
