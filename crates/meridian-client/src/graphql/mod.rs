//! GraphQL client for queries and mutations over HTTP.
//!
//! # Example
//!
//! ```ignore
//! use meridian_client::graphql::GraphQLClient;
//!
//! let client = GraphQLClient::new("https://api.example.com/graphql");
//!
//! // Simple query
//! let viewer: Viewer = client.query("{ viewer { id } }").await?;
//!
//! // Query with typed variables
//! let user: User = client
//!     .request(r#"
//!         query GetUser($id: ID!, $limit: Int) {
//!             user(id: $id) { id name }
//!         }
//!     "#)
//!     .variable("id", "123")
//!     .variable("limit", 10)
//!     .send()
//!     .await?;
//! ```
//!
//! Server-reported errors surface as a single combined message; see
//! [`GraphQLResponse::into_data`] for the resolution rules.

mod client;
mod request;
mod response;

pub use client::{GraphQLClient, GraphQLClientBuilder, GraphQLRequestBuilder};
pub use request::GraphQLRequest;
pub use response::{GraphQLErrorEntry, GraphQLResponse};
