//! Error types shared by every solver path

use thiserror::Error;

use crate::rules::Sum;

/// Errors raised by the engine.
///
/// `InvalidParameter` is returned before any table is allocated or any
/// search starts. `VerificationMismatch` means two computations of the same
/// game value disagree, which is a logic defect rather than a recoverable
/// condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("verification mismatch for k={k}, N={n} at s={state}: {detail}")]
    VerificationMismatch {
        k: usize,
        n: Sum,
        state: Sum,
        detail: String,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
