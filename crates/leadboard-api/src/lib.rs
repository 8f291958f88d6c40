//! Leadboard API /v1: REST endpoints for intake and the CRM board
pub mod handlers;
pub mod metrics;

use axum::{
    routing::{delete, get, post},
    Router,
};
use leadboard_board::Board;
use leadboard_core::FunnelError;
use leadboard_store::LeadStore;
use metrics::Metrics;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Uniform response envelope. `error` carries the single user-visible
/// banner message when `success` is false.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Shared application state: the board behind one lock, the store client,
/// and the metric counters.
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<RwLock<Board>>,
    pub store: Arc<dyn LeadStore>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self {
            board: Arc::new(RwLock::new(Board::with_defaults())),
            store,
            metrics: Arc::new(Metrics::new().expect("Failed to register metrics")),
        }
    }

    /// Load the lead cache from the store (initial load and manual
    /// refresh). Returns the number of leads cached.
    pub async fn load(&self) -> Result<usize, FunnelError> {
        let leads = self.store.list().await?;
        let count = leads.len();
        self.board.write().await.cache.replace(leads);
        Ok(count)
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health))
        .route("/v1/registrations", post(handlers::register))
        .route("/v1/board", get(handlers::board))
        .route("/v1/board/refresh", post(handlers::refresh))
        .route("/v1/board/drop", post(handlers::apply_drop))
        .route(
            "/v1/stages",
            get(handlers::list_stages).post(handlers::create_stage),
        )
        .route("/v1/stages/{id}", delete(handlers::delete_stage))
        .route("/v1/stages/swap", post(handlers::swap_stages))
        .route("/v1/stages/reorder", post(handlers::reorder_stages))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(addr: &str, state: AppState) {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    tracing::info!("leadboard API listening on {}", addr);
    axum::serve(listener, app).await.expect("Server error");
}
