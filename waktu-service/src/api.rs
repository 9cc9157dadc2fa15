use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use waktu_protocol::batch::prepare_batch;
use waktu_protocol::record::{RecordPayload, TimedRecord};

use crate::error::{AppError, AppResult};
use crate::gateway::RecordGateway;

#[derive(Clone)]
struct ApiState {
    gateway: Arc<dyn RecordGateway>,
}

/// Composes the waktu REST API around an injected record gateway.
#[derive(Clone)]
pub struct WaktuApiBuilder {
    state: ApiState,
}

impl WaktuApiBuilder {
    pub fn new(gateway: Arc<dyn RecordGateway>) -> Self {
        Self {
            state: ApiState { gateway },
        }
    }

    pub fn into_router(self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/waktu", post(submit_records))
            .route("/waktu/:id", get(get_record))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state)
    }

    /// Spawns an HTTP server on `bind_address`; send on the returned
    /// channel to stop it.
    pub async fn serve(self, bind_address: &str) -> anyhow::Result<oneshot::Sender<()>> {
        let (tx, rx) = oneshot::channel();
        let listener = tokio::net::TcpListener::bind(bind_address).await?;
        let address = listener.local_addr()?;
        let app = self.into_router();

        tokio::spawn(async move {
            info!(%address, "starting waktu service");
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await
                .ok();
        });

        Ok(tx)
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn submit_records(
    State(state): State<ApiState>,
    payload: Result<Json<Vec<RecordPayload>>, JsonRejection>,
) -> AppResult<&'static str> {
    let Json(batch) = payload?;
    let received = batch.len();

    let records = prepare_batch(batch).map_err(|err| {
        info!(received, %err, "rejected waktu batch");
        AppError::from(err)
    })?;

    for record in &records {
        debug!(id = record.id, when = ?record.when, "storing record");
        state.gateway.insert(record).await.map_err(|err| {
            error!(id = record.id, %err, "failed to store record");
            AppError::from(err)
        })?;
    }

    info!(stored = records.len(), "accepted waktu batch");
    Ok("ok")
}

async fn get_record(
    State(state): State<ApiState>,
    Path(id): Path<i32>,
) -> AppResult<Json<TimedRecord>> {
    let record = state
        .gateway
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("record {id} not found")))?;

    Ok(Json(record))
}
