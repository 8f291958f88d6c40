//! API Handlers
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use leadboard_board::{BoardColumn, DropAction, DropEvent};
use leadboard_core::{
    FunnelError, FunnelStage, Lead, TrialRegistration, LEADBOARD_VERSION, PENDING_STAGE,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::{ApiResponse, AppState};

#[derive(Deserialize)]
pub struct CreateStageRequest {
    pub title: String,
    /// Color token for the lane header; defaults to a neutral one.
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "slate".to_string()
}

#[derive(Deserialize)]
pub struct SwapRequest {
    pub a: String,
    pub b: String,
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
}

fn error_status(err: &FunnelError) -> StatusCode {
    match err {
        FunnelError::StageNotFound(_) | FunnelError::LeadNotFound(_) => StatusCode::NOT_FOUND,
        FunnelError::StageNotEditable(_) => StatusCode::FORBIDDEN,
        FunnelError::DuplicateStage(_) => StatusCode::CONFLICT,
        FunnelError::InvalidStageTitle(_)
        | FunnelError::StageIndexOutOfRange(_)
        | FunnelError::InvalidDrop(_) => StatusCode::BAD_REQUEST,
        FunnelError::Store(_) => StatusCode::BAD_GATEWAY,
        FunnelError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn failure<T>(err: &FunnelError) -> (StatusCode, Json<ApiResponse<T>>) {
    (error_status(err), Json(ApiResponse::err(err.to_string())))
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": LEADBOARD_VERSION })),
    )
}

/// Public intake: insert the registration as a pending lead, then mirror
/// it into the cache so the board picks it up without a reload.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<TrialRegistration>,
) -> (StatusCode, Json<ApiResponse<Lead>>) {
    match state.store.insert(payload).await {
        Ok(lead) => {
            state.metrics.registrations.inc();
            state.board.write().await.cache.insert(lead.clone());
            (StatusCode::CREATED, Json(ApiResponse::ok(lead)))
        }
        Err(e) => {
            state.metrics.store_failures.inc();
            warn!("registration insert failed: {}", e);
            failure(&e)
        }
    }
}

pub async fn board(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<BoardColumn>>>) {
    let board = state.board.read().await;
    (StatusCode::OK, Json(ApiResponse::ok(board.columns())))
}

/// Manual refresh: reload the whole cache from the store.
pub async fn refresh(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<BoardColumn>>>) {
    match state.load().await {
        Ok(count) => {
            tracing::info!("reloaded {} leads", count);
            let board = state.board.read().await;
            (StatusCode::OK, Json(ApiResponse::ok(board.columns())))
        }
        Err(e) => {
            state.metrics.store_failures.inc();
            warn!("lead reload failed: {}", e);
            failure(&e)
        }
    }
}

/// A drag gesture ended. Resolve it, persist remotely where needed, patch
/// the cache last.
pub async fn apply_drop(
    State(state): State<AppState>,
    Json(event): Json<DropEvent>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    // Resolve and act under one write lock so a concurrent stage delete
    // cannot interleave between the remote write and the cache patch.
    let mut board = state.board.write().await;
    match board.resolve_drop(&event) {
        Ok(DropAction::None) => (
            StatusCode::OK,
            Json(ApiResponse::ok(json!({ "applied": false }))),
        ),
        Ok(DropAction::ReorderLanes { from, to }) => match board.registry.reorder(from, to) {
            Ok(()) => (
                StatusCode::OK,
                Json(ApiResponse::ok(json!({ "applied": true }))),
            ),
            Err(e) => {
                warn!("lane reorder failed: {}", e);
                failure(&e)
            }
        },
        Ok(DropAction::MoveLead { lead, to_stage }) => {
            match state.store.update_status(lead, &to_stage).await {
                Ok(()) => {
                    if let Err(e) = board.cache.patch_status(lead, &to_stage) {
                        warn!("cache patch after move failed: {}", e);
                    }
                    state.metrics.lead_moves.inc();
                    (
                        StatusCode::OK,
                        Json(ApiResponse::ok(json!({ "applied": true }))),
                    )
                }
                Err(e) => {
                    // Cache stays as it was; the banner tells the user
                    state.metrics.store_failures.inc();
                    warn!("lead move failed: {}", e);
                    failure(&e)
                }
            }
        }
        Err(e) => {
            warn!("drop rejected: {}", e);
            failure(&e)
        }
    }
}

pub async fn list_stages(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<FunnelStage>>>) {
    let board = state.board.read().await;
    (
        StatusCode::OK,
        Json(ApiResponse::ok(board.registry.list().to_vec())),
    )
}

pub async fn create_stage(
    State(state): State<AppState>,
    Json(payload): Json<CreateStageRequest>,
) -> (StatusCode, Json<ApiResponse<FunnelStage>>) {
    let mut board = state.board.write().await;
    match board.registry.add(&payload.title, &payload.color) {
        Ok(stage) => (StatusCode::CREATED, Json(ApiResponse::ok(stage))),
        Err(e) => {
            warn!("stage create failed: {}", e);
            failure(&e)
        }
    }
}

/// Delete a user-created stage. Every lead in it is reassigned to
/// "pending" (remote write first) before the lane disappears.
pub async fn delete_stage(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<ApiResponse<FunnelStage>>) {
    // The write lock is held for the whole delete so no concurrent drop
    // can slip a lead into the lane between reassignment and removal.
    let mut board = state.board.write().await;

    // Refuse up front so no lead gets reassigned for a delete that would
    // fail anyway.
    match board.registry.get(&id) {
        None => {
            let e = FunnelError::StageNotFound(id.clone());
            return failure(&e);
        }
        Some(stage) if !stage.editable => {
            let e = FunnelError::StageNotEditable(id.clone());
            warn!("stage delete refused: {}", e);
            return failure(&e);
        }
        Some(_) => {}
    }

    for lead_id in board.leads_in(&id) {
        match state.store.update_status(lead_id, PENDING_STAGE).await {
            Ok(()) => {
                if let Err(e) = board.cache.patch_status(lead_id, PENDING_STAGE) {
                    warn!("cache patch during stage delete failed: {}", e);
                }
            }
            Err(e) => {
                // No partial-failure recovery: the stage stays, some leads
                // may already be back in pending.
                state.metrics.store_failures.inc();
                warn!("lead reassignment during stage delete failed: {}", e);
                return failure(&e);
            }
        }
    }

    match board.registry.remove(&id) {
        Ok(stage) => (StatusCode::OK, Json(ApiResponse::ok(stage))),
        Err(e) => {
            warn!("stage delete failed: {}", e);
            failure(&e)
        }
    }
}

pub async fn swap_stages(
    State(state): State<AppState>,
    Json(payload): Json<SwapRequest>,
) -> (StatusCode, Json<ApiResponse<Vec<FunnelStage>>>) {
    let mut board = state.board.write().await;
    match board.registry.swap(&payload.a, &payload.b) {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok(board.registry.list().to_vec())),
        ),
        Err(e) => {
            warn!("stage swap failed: {}", e);
            failure(&e)
        }
    }
}

pub async fn reorder_stages(
    State(state): State<AppState>,
    Json(payload): Json<ReorderRequest>,
) -> (StatusCode, Json<ApiResponse<Vec<FunnelStage>>>) {
    let mut board = state.board.write().await;
    match board.registry.reorder(payload.from, payload.to) {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok(board.registry.list().to_vec())),
        ),
        Err(e) => {
            warn!("stage reorder failed: {}", e);
            failure(&e)
        }
    }
}

pub async fn metrics(State(state): State<AppState>) -> (StatusCode, String) {
    match state.metrics.encode() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
