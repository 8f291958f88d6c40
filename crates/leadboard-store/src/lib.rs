//! Leadboard Store: thin client for the remote lead table
//!
//! The application consumes exactly three store operations: insert one
//! registration, select all leads newest-first, update one lead's status.
//! [`HttpStore`] speaks the hosted store's REST dialect; [`MemoryStore`]
//! backs tests and keyless local runs.

mod http;
mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use leadboard_core::{FunnelError, Lead, TrialRegistration};
use uuid::Uuid;

/// The remote store surface. No retries, no cancellation: a failure maps
/// to `FunnelError::Store` and the caller decides what stays dirty.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Insert a registration as a new pending lead and return the stored row.
    async fn insert(&self, registration: TrialRegistration) -> Result<Lead, FunnelError>;

    /// All leads, ordered by creation timestamp descending.
    async fn list(&self) -> Result<Vec<Lead>, FunnelError>;

    /// Update one lead's funnel stage.
    async fn update_status(&self, id: Uuid, status: &str) -> Result<(), FunnelError>;
}
