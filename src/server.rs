use std::sync::Arc;
use axum::{routing::get, Router, Json};
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use tower_http::cors::{CorsLayer, Any};
use serde::Serialize;
use axum::http::{Method, StatusCode};
use tracing::{info, warn};
use crate::error::{PollsError, Result};
use crate::interface::PollsInterface;
use crate::model::QuestionId;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

pub fn router(interface: Arc<PollsInterface>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);
    Router::new()
        .route("/polls/", get(index))
        .route("/polls/:id/", get(detail))
        .route("/polls/:id/results/", get(results))
        .layer(cors)
        .with_state(interface)
}

/// Binds `address` and serves the poll views until the process stops.
pub async fn serve(address: &str, interface: Arc<PollsInterface>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!(address = %listener.local_addr()?, "polls listening");
    axum::serve(listener, router(interface)).await?;
    Ok(())
}

/// `NotFound` is a 404 whatever its cause; bad input is a 400; the rest is our fault.
pub fn status_of(error: &PollsError) -> StatusCode {
    match error {
        PollsError::NotFound { .. } => StatusCode::NOT_FOUND,
        PollsError::Invalid(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: PollsError) -> Response {
    let status = status_of(&error);
    let msg = format!("{error}");
    warn!(%msg, code=%status.as_u16(), "view error");
    let body = ErrorResponse { status: "error".into(), error: msg };
    (status, Json(body)).into_response()
}

// Only plain digit runs name a question; signs, spaces and the like do not.
fn parse_id(raw: &str) -> Result<QuestionId> {
    let not_found = || PollsError::not_found("question", 0);
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found());
    }
    raw.parse::<i64>().map(QuestionId).map_err(|_| not_found())
}

// The store is synchronous, so each view runs on a blocking thread.
async fn run_view<T, F>(interface: Arc<PollsInterface>, view: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce(&PollsInterface) -> Result<T> + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || view(interface.as_ref())).await;
    match outcome {
        Ok(Ok(page)) => (StatusCode::OK, Json(page)).into_response(),
        Ok(Err(e)) => error_response(e),
        Err(e) => {
            warn!(error=%e, "Join error");
            let body = ErrorResponse { status: "error".into(), error: "Join error".into() };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

async fn index(State(interface): State<Arc<PollsInterface>>) -> Response {
    run_view(interface, |iface| iface.index()).await
}

async fn detail(State(interface): State<Arc<PollsInterface>>, Path(id): Path<String>) -> Response {
    match parse_id(&id) {
        Ok(id) => run_view(interface, move |iface| iface.detail(id)).await,
        Err(e) => error_response(e),
    }
}

async fn results(State(interface): State<Arc<PollsInterface>>, Path(id): Path<String>) -> Response {
    match parse_id(&id) {
        Ok(id) => run_view(interface, move |iface| iface.results(id)).await,
        Err(e) => error_response(e),
    }
}
