//! Leadboard Core: data model and unified error type
//!
//! Shared by the stage registry, the board state, the store client and the
//! API surface.

pub mod data_model;
pub mod error;

pub use data_model::{FunnelStage, Lead, TrialRegistration, PENDING_STAGE};
pub use error::FunnelError;

/// Version advertised by the health endpoint
pub const LEADBOARD_VERSION: &str = "0.1.0";
