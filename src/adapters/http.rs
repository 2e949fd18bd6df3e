use crate::core::processor::ReceiptProcessor;
use crate::domain::model::{PointsResponse, ProcessResponse, ReceiptPayload};
use crate::domain::ports::ReceiptStore;
use crate::utils::error::{ReceiptError, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ReceiptError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("⚠️ {}", self);
        }

        let body = ErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router<S: ReceiptStore + 'static>(processor: Arc<ReceiptProcessor<S>>) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt::<S>))
        .route("/receipts/{id}/points", get(get_points::<S>))
        .fallback(not_found)
        .with_state(processor)
}

/// 啟動 HTTP 服務，直到 shutdown future 完成
pub async fn serve<S, F>(
    listener: TcpListener,
    processor: Arc<ReceiptProcessor<S>>,
    shutdown: F,
) -> Result<()>
where
    S: ReceiptStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("🚀 Listening on http://{}", addr);
    }

    axum::serve(listener, router(processor))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn process_receipt<S: ReceiptStore + 'static>(
    State(processor): State<Arc<ReceiptProcessor<S>>>,
    payload: std::result::Result<Json<ReceiptPayload>, JsonRejection>,
) -> Result<Json<ProcessResponse>> {
    let Json(payload) = payload.map_err(|rejection| ReceiptError::InvalidPayload {
        message: rejection.body_text(),
    })?;

    let id = processor.submit(payload).await?;
    tracing::info!("✅ Processed receipt {}", id);
    Ok(Json(ProcessResponse { id }))
}

async fn get_points<S: ReceiptStore + 'static>(
    State(processor): State<Arc<ReceiptProcessor<S>>>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>> {
    tracing::debug!("Looking up points for {}", id);
    let points = processor.points(&id).await?;
    Ok(Json(PointsResponse { points }))
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            code: "PAGE_NOT_FOUND".to_string(),
            message: "Page not found".to_string(),
        }),
    )
}
