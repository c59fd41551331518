//! REST client and HTTP transport.
//!
//! This module provides the shared HTTP transport, the REST request
//! builder, and the multipart upload builder.
//!
//! # Example
//!
//! ```ignore
//! use meridian_client::http::{MediaFile, RestClient};
//!
//! let client = RestClient::new("https://api.example.com");
//!
//! // Fetch and decode JSON
//! let user: User = client.get("/users/1").send().await?;
//!
//! // Upload a file with a caption
//! let raw = client
//!     .upload("/media")
//!     .field("caption", "hi")
//!     .file(MediaFile::new("file", "a.png", "image/png", png_bytes))
//!     .send()
//!     .await?;
//! ```

mod client;
mod multipart;
mod request;
mod rest;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use multipart::MediaFile;
pub use request::HttpMethod;
pub use rest::{RestClient, RestClientBuilder, RestRequestBuilder, UploadRequestBuilder};
