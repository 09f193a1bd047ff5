//! Web UI handlers

use axum::{
    extract::{Query, State},
    http::{HeaderMap, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::{context, Environment};
use serde::Deserialize;

use crate::api::server::SharedState;
use crate::auth::IdentityInfo;
use crate::error::Result;
use crate::identity::Identity;
use crate::routing::{Destination, GuardDecision, RouteTable};

const LAYOUT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en" class="dark">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }} - CreatorHub</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-900 text-gray-100 min-h-screen">
{% block body %}{% endblock %}
</body>
</html>
"#;

const LOGIN_TEMPLATE: &str = r#"{% extends "layout.html" %}
{% block body %}
<div class="max-w-sm mx-auto mt-24 bg-gray-800 rounded p-8">
    <h1 class="text-2xl font-bold mb-6">Sign in</h1>
    <form id="login" data-from="{{ from }}">
        <input name="email" type="email" required placeholder="Email" class="w-full mb-3 px-3 py-2 rounded bg-gray-700">
        <input name="password" type="password" required placeholder="Password" class="w-full mb-6 px-3 py-2 rounded bg-gray-700">
        <button class="w-full px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded font-medium">Sign in</button>
    </form>
    <p id="error" class="text-red-400 mt-4 hidden">Invalid credentials</p>
</div>
<script>
document.getElementById("login").addEventListener("submit", async (e) => {
    e.preventDefault();
    const form = e.target;
    const res = await fetch("/auth/login", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ email: form.email.value, password: form.password.value }),
    });
    if (res.ok) {
        window.location = form.dataset.from || "/";
    } else {
        document.getElementById("error").classList.remove("hidden");
    }
});
</script>
{% endblock %}
"#;

const PAGE_TEMPLATE: &str = r#"{% extends "layout.html" %}
{% block body %}
<div class="container mx-auto px-8 py-8 max-w-6xl">
    <header class="flex justify-between items-center mb-8">
        <h1 class="text-3xl font-bold">{{ title }}</h1>
        <div class="text-sm text-gray-400">
            {{ user.name }} ({{ user.role }})
            <button class="ml-4 px-2 py-1 bg-gray-700 rounded"
                onclick="fetch('/auth/logout', {method: 'POST'}).then(() => window.location = '/')">Sign out</button>
        </div>
    </header>
    <nav class="space-x-4 mb-8">
    {% for link in links %}
        <a href="{{ link.path }}" class="text-blue-400 hover:underline">{{ link.name }}</a>
    {% endfor %}
    </nav>
    <p class="text-gray-400">{{ destination.name }} at {{ destination.path }}</p>
</div>
{% endblock %}
"#;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub from: Option<String>,
}

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("layout.html", LAYOUT_TEMPLATE)?;
    env.add_template("login.html", LOGIN_TEMPLATE)?;
    env.add_template("page.html", PAGE_TEMPLATE)?;
    Ok(env)
}

/// Page navigation for the identity the request's token names: run the
/// guard, then redirect or render
pub async fn page(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response> {
    let identity = state.identify(&headers).ok();

    match state.guard.evaluate(uri.path(), identity.as_deref()) {
        GuardDecision::Render { destination } => {
            let html = match identity.as_deref() {
                Some(identity) if destination.required_role().is_some() => {
                    render_page(&state, &destination, identity)?
                }
                _ => {
                    let table = state.guard.table();
                    let from = query.from.as_deref().and_then(|f| return_path(table, f));
                    render_login(from)?
                }
            };
            Ok(Html(html).into_response())
        }
        decision => {
            let location = decision.location().unwrap_or_else(|| "/".to_string());
            tracing::debug!("Redirecting {} to {}", uri.path(), location);
            Ok(Redirect::to(&location).into_response())
        }
    }
}

/// The protected path to return to after sign-in; anything else is dropped
pub fn return_path<'a>(table: &'a RouteTable, from: &str) -> Option<&'a str> {
    table
        .resolve(from)
        .filter(|destination| destination.required_role().is_some())
        .map(|destination| destination.path.as_str())
}

/// Render the login page
pub fn render_login(from: Option<&str>) -> Result<String> {
    let env = environment()?;
    let template = env.get_template("login.html")?;
    Ok(template.render(context! {
        title => "Sign in",
        from => from.unwrap_or(""),
    })?)
}

/// Render a role page for the signed-in identity
pub fn render_page(
    state: &SharedState,
    destination: &Destination,
    identity: &Identity,
) -> Result<String> {
    let links: Vec<&Destination> = state
        .guard
        .table()
        .iter()
        .filter(|d| d.required_role() == Some(identity.role()))
        .collect();

    let env = environment()?;
    let template = env.get_template("page.html")?;
    Ok(template.render(context! {
        title => &destination.name,
        destination => destination,
        user => IdentityInfo::from(identity),
        links => links,
    })?)
}
