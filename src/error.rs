//! Error kinds raised by contract violations on the surface tree.
//!
//! Every variant is a programmer error: it is returned synchronously from the
//! call that broke the contract and the tree is left exactly as it was before
//! the call.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DisplayError {
    #[error("identity {0} is already registered")]
    IdentityConflict(i64),
    #[error("identity {id} is invalid: {reason}")]
    InvalidIdentity { id: i64, reason: &'static str },
    #[error("invalid parent: {0}")]
    InvalidParent(&'static str),
    #[error("surfaces belong to different displays")]
    CrossDisplay,
    #[error("geometry must be finite: {0}")]
    InvalidGeometry(String),
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

pub type Result<T> = std::result::Result<T, DisplayError>;
