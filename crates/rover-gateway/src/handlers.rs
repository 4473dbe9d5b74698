use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

use super::server::AppState;

const INDEX_HTML: &str = include_str!("assets/index.html");

#[derive(serde::Deserialize)]
pub(crate) struct IngestPayload {
    pub repo_url: String,
}

#[derive(serde::Deserialize)]
pub(crate) struct AskPayload {
    pub question: String,
}

#[derive(serde::Serialize)]
struct Notification {
    status: &'static str,
    message: String,
}

#[derive(serde::Serialize)]
struct AnswerResponse {
    status: &'static str,
    answer: String,
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
}

pub(crate) async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

pub(crate) async fn ingest_handler(
    State(state): State<AppState>,
    Json(payload): Json<IngestPayload>,
) -> impl IntoResponse {
    if payload.repo_url.trim().is_empty() {
        let body = Notification {
            status: "warning",
            message: "Please enter a repository URL.".into(),
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    match state.ingestor.ingest(&payload.repo_url).await {
        Ok(report) => {
            let message = format!(
                "Repository indexed successfully: {} chunks from {} objects ({} skipped).",
                report.chunks_embedded, report.objects_extracted, report.chunks_skipped
            );
            let status = if report.chunks_skipped > 0 {
                "warning"
            } else {
                "ok"
            };
            Json(Notification { status, message }).into_response()
        }
        Err(e) => {
            tracing::error!("ingestion failed: {e}");
            let body = Notification {
                status: "error",
                message: format!("An error occurred during ingestion: {e}"),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

pub(crate) async fn ask_handler(
    State(state): State<AppState>,
    Json(payload): Json<AskPayload>,
) -> impl IntoResponse {
    if payload.question.trim().is_empty() {
        let body = Notification {
            status: "warning",
            message: "Please enter a question.".into(),
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    match state.pipeline.answer(&payload.question).await {
        Ok(answer) => Json(AnswerResponse {
            status: "ok",
            answer,
        })
        .into_response(),
        Err(e) => {
            tracing::error!("question failed: {e}");
            let body = Notification {
                status: "error",
                message: format!("An error occurred while getting the answer: {e}"),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
