//! Error types for Cora.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoraError {
    #[error("Daemon not running. Start corad and try again.")]
    DaemonNotRunning,

    #[error("Session not found or expired. Please re-authenticate.")]
    SessionNotFound,

    #[error("Phone verification is required before NRIC verification")]
    VerificationOrder,

    #[error("Session is not authenticated")]
    NotAuthenticated,

    #[error("Invalid mobile number: {0}")]
    InvalidMobile(String),

    #[error("Unknown plan: {0}")]
    UnknownPlan(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoraError {
    pub fn code(&self) -> i32 {
        match self {
            CoraError::DaemonNotRunning => -32000,
            CoraError::SessionNotFound => -32001,
            CoraError::VerificationOrder => -32002,
            CoraError::NotAuthenticated => -32003,
            CoraError::InvalidMobile(_) => -32004,
            CoraError::UnknownPlan(_) => -32005,
            CoraError::Config(_) => -32006,
            CoraError::Http(_) => -32007,
            CoraError::Io(_) => -32008,
            CoraError::Json(_) => -32700,
            CoraError::Internal(_) => -32603,
        }
    }
}
