//! REST and GraphQL client helpers for Meridian services.
//!
//! This crate provides two small, independent API clients built atop a
//! shared HTTP transport:
//!
//! - **REST**: [`RestClient`] builds and issues requests against a base
//!   URL with query parameters, headers, and raw JSON bodies, decoding
//!   responses into a caller-specified type. Its upload builder encodes
//!   named files plus scalar fields into a `multipart/form-data` body.
//! - **GraphQL**: [`GraphQLClient`] issues a `{query, variables}` payload
//!   against a fixed endpoint and resolves the `{data, errors}` envelope.
//!
//! Every call issues exactly one asynchronous request and completes
//! exactly once. Clients hold no mutable state between calls, so cloning
//! them is cheap and concurrent calls on one instance are safe. There is
//! no retry, caching, or request batching; errors are handed straight
//! back to the caller.
//!
//! # REST requests
//!
//! ```ignore
//! use meridian_client::RestClient;
//!
//! let client = RestClient::new("https://api.example.com");
//!
//! let users: Vec<User> = client
//!     .get("/users")
//!     .query("include", "profile")
//!     .send()
//!     .await?;
//! ```
//!
//! # File uploads
//!
//! ```ignore
//! use meridian_client::{MediaFile, RestClient};
//!
//! let client = RestClient::new("https://api.example.com");
//!
//! let raw = client
//!     .upload("/media")
//!     .field("caption", "hi")
//!     .file(MediaFile::new("file", "a.png", "image/png", png_bytes))
//!     .send()
//!     .await?;
//! ```
//!
//! # GraphQL queries
//!
//! ```ignore
//! use meridian_client::GraphQLClient;
//!
//! let client = GraphQLClient::new("https://api.example.com/graphql");
//!
//! let viewer: Viewer = client.query("{ viewer { id } }").await?;
//! ```

mod error;
pub mod graphql;
pub mod http;

pub use error::{ClientError, Result};

// Re-export commonly used types at the crate root
pub use graphql::{GraphQLClient, GraphQLClientBuilder, GraphQLRequest, GraphQLResponse};
pub use self::http::{
    HttpClient, HttpClientBuilder, HttpMethod, MediaFile, RestClient, RestClientBuilder,
};
