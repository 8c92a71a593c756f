use anyhow::Result;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use fw_core::error::AppError;
use fw_core::feedback::{FeedbackDraft, FeedbackEntry, FeedbackId};
use fw_core::store::FeedbackStore;
use fw_core::{config, http, logging, server, store};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};


const SERVICE_NAME: &str = "fw-api";

#[derive(Clone)]
pub(crate) struct AppState {
    store: Arc<dyn FeedbackStore>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    success: bool,
    message: &'static str,
    id: FeedbackId,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    success: bool,
    count: usize,
    feedback: Vec<FeedbackEntry>,
}

#[derive(Serialize)]
struct HealthStatus {
    status: String,
}

pub struct ApiConfig {
    pub addr: SocketAddr,
    pub database_url: Option<String>,
}

pub fn load_config() -> Result<ApiConfig> {
    let addr = config::socket_addr_from_env("FEEDBACK_API_ADDR", "0.0.0.0:8090")?;
    let database_url = config::optional_env("FEEDBACK_DATABASE_URL");
    Ok(ApiConfig { addr, database_url })
}

pub async fn run(config: ApiConfig) -> Result<()> {
    logging::init(SERVICE_NAME);
    let store = store::connect_store(config.database_url.as_deref()).await?;
    let router = router(AppState { store });
    let router = http::apply_standard_layers(router, SERVICE_NAME);
    server::serve(config.addr, router).await
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/api/feedback",
            get(list_feedback)
                .post(submit_feedback)
                .fallback(method_not_allowed),
        )
        .with_state(state)
}

async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.check_ready().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus { status: "ok".into() })),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthStatus {
                status: "unavailable".into(),
            }),
        ),
    }
}

async fn list_feedback(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list().await {
        Ok(feedback) => (
            StatusCode::OK,
            Json(ListResponse {
                success: true,
                count: feedback.len(),
                feedback,
            }),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "failed to retrieve feedback");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to retrieve feedback")),
            )
                .into_response()
        }
    }
}

async fn submit_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(draft): Json<FeedbackDraft>,
) -> impl IntoResponse {
    let fallback_user_agent = header_value(&headers, header::USER_AGENT.as_str());
    let ip = header_value(&headers, "x-forwarded-for").unwrap_or_else(|| "unknown".to_string());

    let entry = match draft.into_entry(fallback_user_agent, Some(ip)) {
        Ok(entry) => entry,
        Err(AppError::Validation(message)) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response();
        }
        Err(err) => {
            error!(error = %err, "failed to build feedback entry");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to store feedback")),
            )
                .into_response();
        }
    };

    match state.store.append(&entry).await {
        Ok(()) => {
            info!(id = %entry.id, area = %entry.area, page = %entry.page, "new feedback received");
            (
                StatusCode::OK,
                Json(SubmitResponse {
                    success: true,
                    message: "Feedback submitted successfully",
                    id: entry.id,
                }),
            )
                .into_response()
        }
        Err(err) => {
            error!(error = %err, "failed to store feedback");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to store feedback")),
            )
                .into_response()
        }
    }
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
