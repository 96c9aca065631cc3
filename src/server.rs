//! REST API for the email dashboard.
//!
//! Every route is thin glue: deserialize, call the engine and/or store,
//! serialize. The one oddity is `POST /analyze-email`, a legacy analyzer
//! kept for old dashboard builds; see [`legacy_score`].

use std::net::SocketAddr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;
use tower_http::cors::CorsLayer;

use crate::analyzer::analyze;
use crate::normalization::EmailInput;
use crate::store::{self, EmailFilter, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("email not found")]
    NotFound,
    #[error("missing fields")]
    MissingFields,
    #[error("storage error")]
    Storage(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound | ApiError::Storage(StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, "Email not found".to_string())
            }
            ApiError::MissingFields => (StatusCode::BAD_REQUEST, "Missing fields".to_string()),
            ApiError::Storage(err) => {
                error!("storage error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default)]
    filter: EmailFilter,
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: String,
    is_spam: Option<bool>,
}

#[derive(Debug, Serialize)]
struct EmailWithIndicators {
    email: store::EmailRecord,
    indicators: Vec<store::IndicatorRecord>,
}

/// POST /api/emails — analyze and persist one email.
async fn create_email(
    State(state): State<AppState>,
    Json(input): Json<EmailInput>,
) -> Result<(StatusCode, Json<store::EmailRecord>), ApiError> {
    let analysis = analyze(&input);
    info!(
        "analyzed email from {}: score={} spam={}",
        input.sender_email, analysis.spam_score, analysis.is_spam
    );
    let email = store::save_analysis(&state.pool, &input, &analysis).await?;
    Ok((StatusCode::CREATED, Json(email)))
}

/// GET /api/emails?filter=all|inbox|spam
async fn list_emails(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<store::EmailRecord>>, ApiError> {
    let emails = store::list_emails(&state.pool, params.filter).await?;
    Ok(Json(emails))
}

/// GET /api/emails/:id — one email with its indicators, heaviest first.
async fn get_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmailWithIndicators>, ApiError> {
    match store::fetch_email(&state.pool, &id).await? {
        Some((email, indicators)) => Ok(Json(EmailWithIndicators { email, indicators })),
        None => Err(ApiError::NotFound),
    }
}

/// PATCH /api/emails/:id — move between inbox/spam, optionally reflag.
async fn patch_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<store::EmailRecord>, ApiError> {
    let email = store::update_status(&state.pool, &id, &update.status, update.is_spam).await?;
    Ok(Json(email))
}

/// DELETE /api/emails/:id
async fn delete_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store::delete_email(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct LegacyRequest {
    subject: Option<String>,
    body: Option<String>,
}

#[derive(Debug, Serialize)]
struct LegacyResponse {
    #[serde(rename = "isSpam")]
    is_spam: bool,
    score: u32,
    message: &'static str,
}

const LEGACY_KEYWORDS: &[&str] = &[
    "free",
    "win",
    "winner",
    "cash",
    "offer",
    "urgent",
    "click",
    "prize",
    "money",
    "limited time",
    "act now",
    "verify",
    "suspended",
    "congratulations",
];

/// The pre-dashboard scoring formula: one point per keyword present, two for
/// two or more links, two for an all-uppercase subject, spam at two points.
/// It disagrees with the real engine on purpose; the old dashboard shipped
/// against this endpoint and its behavior is frozen until that build is
/// retired.
fn legacy_score(subject: &str, body: &str) -> (bool, u32) {
    let text = format!("{} {}", subject, body).to_lowercase();

    let mut score: u32 = 0;
    for keyword in LEGACY_KEYWORDS {
        if text.contains(keyword) {
            score += 1;
        }
    }

    if body.matches("http").count() >= 2 {
        score += 2;
    }
    if subject == subject.to_uppercase() {
        score += 2;
    }

    (score >= 2, score)
}

/// POST /analyze-email — legacy analyzer, no persistence.
async fn analyze_email_legacy(
    Json(request): Json<LegacyRequest>,
) -> Result<Json<LegacyResponse>, ApiError> {
    let subject = request.subject.unwrap_or_default();
    let body = request.body.unwrap_or_default();
    if subject.is_empty() || body.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let (is_spam, score) = legacy_score(&subject, &body);
    Ok(Json(LegacyResponse {
        is_spam,
        score,
        message: if is_spam {
            "Spam detected"
        } else {
            "Email is safe"
        },
    }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/emails", post(create_email).get(list_emails))
        .route(
            "/api/emails/:id",
            get(get_email).patch(patch_email).delete(delete_email),
        )
        .route("/analyze-email", post(analyze_email_legacy))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(pool: SqlitePool, bind_address: &str) -> anyhow::Result<()> {
    let app = router(AppState { pool });
    let addr: SocketAddr = bind_address.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
