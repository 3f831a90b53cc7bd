//! HTTP routes.
//!
//! Two parallel login flows share one user directory:
//!
//! - bearer: `/login` returns a signed token, `/profile` expects it in the
//!   `Authorization` header and keeps no server-side state
//! - cookie: `/session/login` stores a session and sets a cookie,
//!   `/session/profile` and `/session/logout` look it up

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;

use authlab_auth::User;

use crate::error::{ApiError, ApiResult};
use crate::extract::{bearer_token, session_clear_cookie, session_cookie, session_set_cookie};
use crate::response::Reply;
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(profile))
        .route("/session/login", post(session_login))
        .route("/session/profile", get(session_profile))
        .route("/session/logout", post(session_logout))
        .with_state(state)
}

/// Register and login request body.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

fn parse_body(body: Result<Json<Credentials>, JsonRejection>) -> ApiResult<Credentials> {
    body.map(|Json(credentials)| credentials)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))
}

/// Password checks are CPU-bound, so they run off the async workers.
async fn authenticate(state: &AppState, credentials: Credentials) -> ApiResult<User> {
    let state = state.clone();
    tokio::task::spawn_blocking(move || {
        state
            .users()
            .authenticate(&credentials.username, &credentials.password)
    })
    .await
    .map_err(|e| ApiError::internal(format!("Authentication task failed: {e}")))?
    .map_err(ApiError::from)
}

async fn health() -> &'static str {
    "ok"
}

/// POST /register
async fn register(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let credentials = parse_body(body)?;
    let username = credentials.username.clone();

    let users = state.clone();
    tokio::task::spawn_blocking(move || {
        users
            .users()
            .register(&credentials.username, &credentials.password)
    })
    .await
    .map_err(|e| ApiError::internal(format!("Registration task failed: {e}")))??;

    tracing::info!(username = %username, "User registered");
    Ok((StatusCode::CREATED, Json(Reply::success("Registered"))))
}

/// POST /login
///
/// Issues a bearer token; nothing is stored server-side.
async fn login(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let credentials = parse_body(body)?;
    let user = authenticate(&state, credentials).await?;

    let token = state.tokens().issue_now(&user.username)?;

    tracing::info!(username = %user.username, "Bearer login succeeded");
    Ok(Json(
        Reply::success(format!("Welcome, {}!", user.username)).with_token(token),
    ))
}

/// GET /profile
async fn profile(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<impl IntoResponse> {
    let token = bearer_token(&headers)?;
    let claims = state.tokens().verify_now(token)?;
    Ok(Json(Reply::success(format!("Hello, {}!", claims.subject))))
}

/// POST /session/login
async fn session_login(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let credentials = parse_body(body)?;
    let user = authenticate(&state, credentials).await?;

    let session = state.sessions().create(&user.username, Utc::now())?;
    let cookie = session_set_cookie(&session.id, state.sessions().ttl().num_seconds())?;

    tracing::info!(
        username = %user.username,
        session = session.short_id(),
        "Session login succeeded"
    );
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(Reply::success(format!("Welcome, {}!", user.username))),
    ))
}

/// GET /session/profile
async fn session_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let id = session_cookie(&headers).ok_or_else(|| ApiError::unauthorized("Not logged in"))?;
    let session = state.sessions().get(id, Utc::now())?;
    Ok(Json(Reply::success(format!("Hello, {}!", session.username))))
}

/// POST /session/logout
async fn session_logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(id) = session_cookie(&headers) {
        state.sessions().delete(id);
    }
    (
        [(header::SET_COOKIE, session_clear_cookie())],
        Json(Reply::success("Logged out")),
    )
}
