//! API route handlers

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::server::SharedState;
use crate::auth::{
    create_token, identify_request, middleware::TOKEN_COOKIE, IdentityInfo, LoginRequest,
    LoginResponse,
};
use crate::error::{Error, Result};
use crate::identity::Role;
use crate::routing::{Destination, GuardDecision};

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct NavigateQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub authenticated: bool,
    pub session_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub user: Option<IdentityInfo>,
}

#[derive(Debug, Serialize)]
pub struct RoutesResponse<'a> {
    pub destinations: Vec<&'a Destination>,
    pub homes: BTreeMap<String, &'a str>,
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok("healthy"))
}

// Auth routes

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let session = state
        .session
        .login_session(&req.email, &req.password)
        .await
        .ok_or(Error::InvalidCredentials)?;

    let token = create_token(&session.identity, &state.config.auth)?;
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        TOKEN_COOKIE, token, state.config.auth.token_ttl_secs
    );

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse {
            token,
            user: IdentityInfo::from(session.identity.as_ref()),
        }),
    ))
}

pub async fn logout(State(state): State<SharedState>) -> impl IntoResponse {
    state.session.logout().await;
    let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", TOKEN_COOKIE);
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(ApiResponse::ok("logged out")),
    )
}

/// The identity behind the request token
pub async fn me(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<IdentityInfo>> {
    let identity = state.identify(&headers)?;
    Ok(Json(IdentityInfo::from(identity.as_ref())))
}

// Session & routing

/// Session details for the caller. The process session's id and start time
/// are only reported to the identity it belongs to.
pub async fn session_info(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Json<SessionInfo> {
    let Ok(identity) = state.identify(&headers) else {
        return Json(SessionInfo {
            authenticated: false,
            session_id: None,
            started_at: None,
            user: None,
        });
    };

    let session = state
        .session
        .session()
        .await
        .filter(|session| session.identity.id == identity.id);

    Json(SessionInfo {
        authenticated: true,
        session_id: session.as_ref().map(|s| s.id.to_string()),
        started_at: session.map(|s| s.started_at),
        user: Some(IdentityInfo::from(identity.as_ref())),
    })
}

pub async fn navigate(
    State(state): State<SharedState>,
    Query(query): Query<NavigateQuery>,
    headers: HeaderMap,
) -> Json<GuardDecision> {
    let identity = state.identify(&headers).ok();
    Json(state.guard.evaluate(&query.path, identity.as_deref()))
}

pub async fn list_routes(State(state): State<SharedState>) -> impl IntoResponse {
    let table = state.guard.table();
    let homes = Role::ALL
        .iter()
        .map(|role| (role.to_string(), table.role_home(*role).path.as_str()))
        .collect();

    Json(RoutesResponse {
        destinations: table.iter().collect(),
        homes,
    })
    .into_response()
}
