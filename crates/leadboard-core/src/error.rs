//! Unified Error Model
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum FunnelError {
    #[error("STAGE/NOT_FOUND: {0}")]
    StageNotFound(String),

    #[error("STAGE/NOT_EDITABLE: {0}")]
    StageNotEditable(String),

    #[error("STAGE/DUPLICATE: {0}")]
    DuplicateStage(String),

    #[error("STAGE/INVALID_TITLE: {0:?}")]
    InvalidStageTitle(String),

    #[error("STAGE/BAD_INDEX: {0}")]
    StageIndexOutOfRange(usize),

    #[error("LEAD/NOT_FOUND: {0}")]
    LeadNotFound(Uuid),

    #[error("DROP/INVALID: {0}")]
    InvalidDrop(String),

    #[error("STORE/{0}")]
    Store(String),

    #[error("CONFIG/{0}")]
    Config(String),
}
