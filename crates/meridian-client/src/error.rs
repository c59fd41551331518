//! Error types for the client library.

use thiserror::Error;

/// Errors produced by the REST and GraphQL clients.
///
/// Transport and JSON failures are surfaced exactly as the underlying
/// libraries report them; nothing is retried or wrapped further.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint could not be resolved against the base URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The transport failed before a response body was available
    /// (connection, DNS, TLS, or timeout).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The response completed at the transport level but carried no body.
    #[error("response contained no data")]
    EmptyBody,

    /// A body failed to serialize, or a response body did not decode into
    /// the requested type.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// The GraphQL server reported one or more errors. The message joins
    /// every reported error message with `", "`.
    #[error("GraphQL error: {0}")]
    Graphql(String),

    /// The GraphQL envelope carried neither data nor errors.
    #[error("GraphQL response contained neither data nor errors")]
    UnknownResponse,
}

/// A specialized Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
