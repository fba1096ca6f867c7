//! Error types raised by store implementations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("battle store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
