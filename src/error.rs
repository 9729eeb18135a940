//! Service-level error type returned by the exposed operations.

use crate::fncall::FnCallError;
use crate::food::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum ReapError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("bad user id: {0:?}")]
    BadUserId(String),

    #[error("not implemented yet: {0}")]
    NotImplemented(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    FnCall(#[from] FnCallError),

    #[error("request cancelled")]
    Cancelled,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ReapError {
    /// Validation failures are the caller's fault and are never retried.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::BadUserId(_))
    }
}
