//! Binary entrypoint for the leadboard API server.
use leadboard_api::{run, AppState};
use leadboard_store::{HttpStore, LeadStore, MemoryStore};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadboard_api=info,tower_http=info".into()),
        )
        .init();

    let store: Arc<dyn LeadStore> = match HttpStore::from_env() {
        Ok(Some(store)) => Arc::new(store),
        Ok(None) => {
            tracing::warn!("LEADBOARD_STORE_URL not set, falling back to in-memory store");
            Arc::new(MemoryStore::new())
        }
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(store);
    match state.load().await {
        Ok(count) => tracing::info!("loaded {} leads from the store", count),
        Err(e) => tracing::warn!("initial lead load failed: {}", e),
    }

    // Default listen address can be overridden with LEADBOARD_ADDR
    let addr = std::env::var("LEADBOARD_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    run(&addr, state).await;
}
