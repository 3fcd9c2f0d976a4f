// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Remote call failed: {0}")]
    RemoteCallFailed(String),
    #[error("Nothing entered")]
    EmptyNote,
    #[error("Local store write failed: {0}")]
    StoreFailed(String),
}
