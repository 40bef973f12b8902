//! Parse errors for the core types.

use thiserror::Error;

/// Errors produced while parsing addresses, digests and type tags.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Invalid account address or object ID
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid base58 digest
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    /// Invalid Move identifier
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Invalid Move type tag
    #[error("invalid type tag: {0}")]
    InvalidTypeTag(String),

    /// Invalid `package::module::function` target
    #[error("invalid call target: {0}")]
    InvalidTarget(String),
}
