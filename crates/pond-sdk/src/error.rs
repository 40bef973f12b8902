//! The unified error type for the SDK.

use pond_sdk_types::TypeError;
use thiserror::Error;

/// Result alias used throughout the SDK.
pub type SdkResult<T> = Result<T, SdkError>;

/// Any error produced while building, signing or submitting a
/// transaction.
#[derive(Error, Debug)]
pub enum SdkError {
    /// A network-level failure talking to the fullnode
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The fullnode returned a body that did not parse
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary serialization of the transaction failed
    #[error("bcs error: {0}")]
    Bcs(#[from] bcs::Error),

    /// A malformed endpoint URL
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    /// A malformed address, digest or type tag
    #[error("type error: {0}")]
    Types(#[from] TypeError),

    /// The fullnode answered with a JSON-RPC error object
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Human-readable message from the node
        message: String,
    },

    /// The fullnode answered with a non-success HTTP status
    #[error("unexpected status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        message: String,
    },

    /// A private key that could not be decoded
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The transaction was assembled incorrectly
    #[error("builder error: {0}")]
    Builder(String),

    /// An argument handle from one builder was passed to another
    #[error("argument belongs to a different transaction builder")]
    ForeignArgument,

    /// `finish` was called without a gas budget
    #[error("no gas budget set for transaction")]
    MissingGasBudget,

    /// No suitable coin could be found to pay for gas
    #[error("gas payment: {0}")]
    GasPayment(String),

    /// An object input could not be resolved on chain
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// The node returned object data in a shape the SDK cannot use
    #[error("invalid object data for {0}: {1}")]
    InvalidObject(String, String),

    /// A problem reading or querying the object manifest
    #[error("manifest error: {0}")]
    Manifest(String),

    /// A missing or malformed environment setting
    #[error("config error: {0}")]
    Config(String),
}

impl SdkError {
    /// Shorthand for a builder misuse error.
    pub fn builder(message: impl Into<String>) -> Self {
        SdkError::Builder(message.into())
    }

    /// Shorthand for a key decoding error.
    pub fn invalid_key(message: impl Into<String>) -> Self {
        SdkError::InvalidKey(message.into())
    }

    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        SdkError::Config(message.into())
    }
}
