//! Error types.
//!
//! - `LinalgError`: failures inside the numerical routines (`math`).
//! - `AppError`: what the binary reports; carries the process exit code.
//!
//! Exit codes:
//! - `2`: input/IO problems (missing file, malformed row, export failure)
//! - `3`: no usable data
//! - `4`: numerical or terminal failures

use thiserror::Error;

/// Numerical failure raised by a solver or factorisation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    #[error("matrix is not positive-definite (Cholesky factorisation failed)")]
    NotPositiveDefinite,
    #[error("triangular system is singular (zero pivot at row {row})")]
    Singular { row: usize },
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("SVD failed: {0}")]
    SvdFailed(String),
    #[error("no data points")]
    EmptyInput,
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<LinalgError> for AppError {
    fn from(err: LinalgError) -> Self {
        AppError::new(4, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
