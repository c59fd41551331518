//! REST API client.
//!
//! This module provides a client for consuming JSON REST APIs: requests are
//! built against a fixed base URL, issued asynchronously, and their bodies
//! decoded into a caller-specified type. A separate upload builder encodes
//! named files plus scalar fields into a `multipart/form-data` body.
//!
//! # Example
//!
//! ```ignore
//! use meridian_client::http::{HttpMethod, RestClient};
//!
//! let client = RestClient::new("https://api.example.com");
//!
//! // GET /users?include=profile, decoded into the caller's type
//! let users: Vec<User> = client
//!     .get("/users")
//!     .query("include", "profile")
//!     .send()
//!     .await?;
//!
//! // POST /users with a raw JSON payload
//! let user: User = client
//!     .post("/users")
//!     .body(serde_json::to_vec(&new_user)?)
//!     .send()
//!     .await?;
//! ```

use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use url::Url;

use super::client::HttpClient;
use super::multipart::{MediaFile, MultipartBody};
use super::request::HttpMethod;
use crate::error::{ClientError, Result};

/// Builder for creating a REST client.
pub struct RestClientBuilder {
    base_url: String,
    http_client: Option<HttpClient>,
    default_headers: http::HeaderMap,
}

impl RestClientBuilder {
    /// Create a new builder with the specified base URL.
    ///
    /// All request endpoints are appended to this base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http_client: None,
            default_headers: http::HeaderMap::new(),
        }
    }

    /// Use an existing HTTP transport instead of creating a new one.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Add a default header that will be sent with every request.
    ///
    /// Invalid header names or values are ignored.
    pub fn default_header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.default_headers.insert(name, value);
        }
        self
    }

    /// Build the REST client.
    ///
    /// # Panics
    ///
    /// Panics if the base URL is not a valid absolute URL. An invalid base
    /// URL is a configuration error, not a runtime fault.
    pub fn build(self) -> RestClient {
        // Validate up front; the trimmed string form is what endpoints are
        // appended to.
        Url::parse(&self.base_url).expect("RestClient requires a valid absolute base URL");
        let base_url = self.base_url.trim_end_matches('/').to_string();

        RestClient {
            inner: Arc::new(RestClientInner {
                transport: self.http_client.unwrap_or_default(),
                base_url,
                default_headers: self.default_headers,
            }),
        }
    }
}

/// Internal state for the REST client.
struct RestClientInner {
    transport: HttpClient,
    base_url: String,
    default_headers: http::HeaderMap,
}

/// A client for JSON REST APIs rooted at a fixed base URL.
///
/// The client holds no mutable state between calls; it is cheaply cloneable
/// and concurrent calls on the same instance are safe.
///
/// # Example
///
/// ```ignore
/// use meridian_client::http::RestClient;
///
/// let client = RestClient::builder("https://api.example.com")
///     .default_header("Accept", "application/json")
///     .build();
///
/// let user: User = client.get("/users/1").send().await?;
/// ```
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

impl RestClient {
    /// Create a REST client with the specified base URL and an ambient
    /// HTTP transport.
    ///
    /// # Panics
    ///
    /// Panics if the base URL is not a valid absolute URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::builder(base_url).build()
    }

    /// Create a new builder for configuring a REST client.
    pub fn builder(base_url: impl Into<String>) -> RestClientBuilder {
        RestClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Create a GET request builder.
    pub fn get(&self, endpoint: &str) -> RestRequestBuilder {
        self.request(HttpMethod::Get, endpoint)
    }

    /// Create a POST request builder.
    pub fn post(&self, endpoint: &str) -> RestRequestBuilder {
        self.request(HttpMethod::Post, endpoint)
    }

    /// Create a PUT request builder.
    pub fn put(&self, endpoint: &str) -> RestRequestBuilder {
        self.request(HttpMethod::Put, endpoint)
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, endpoint: &str) -> RestRequestBuilder {
        self.request(HttpMethod::Delete, endpoint)
    }

    /// Create a request builder with the given method and endpoint.
    pub fn request(&self, method: HttpMethod, endpoint: &str) -> RestRequestBuilder {
        RestRequestBuilder {
            client: self.clone(),
            method,
            endpoint: endpoint.to_string(),
            headers: http::HeaderMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Create a `multipart/form-data` upload builder for the given endpoint.
    ///
    /// The method defaults to POST.
    pub fn upload(&self, endpoint: &str) -> UploadRequestBuilder {
        UploadRequestBuilder {
            client: self.clone(),
            endpoint: endpoint.to_string(),
            method: HttpMethod::Post,
            headers: http::HeaderMap::new(),
            fields: Vec::new(),
            media: Vec::new(),
        }
    }

    /// Resolve an endpoint against the base URL.
    fn resolve(&self, endpoint: &str) -> Result<Url> {
        let endpoint = if endpoint.starts_with('/') {
            endpoint.to_string()
        } else {
            format!("/{endpoint}")
        };
        Ok(Url::parse(&format!("{}{}", self.inner.base_url, endpoint))?)
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.inner.base_url)
            .finish()
    }
}

/// Builder for a single REST request.
pub struct RestRequestBuilder {
    client: RestClient,
    method: HttpMethod,
    endpoint: String,
    headers: http::HeaderMap,
    query: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl RestRequestBuilder {
    /// Add a header to the request. Headers are set by key; a repeated
    /// name overwrites the earlier value. Invalid names or values are
    /// ignored.
    pub fn header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add a query parameter. Parameters are set by key; a repeated key
    /// overwrites the earlier value, so each key appears exactly once in
    /// the resolved URL.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        upsert_pair(&mut self.query, key.into(), value.into());
        self
    }

    /// Add multiple query parameters.
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        for (key, value) in pairs {
            upsert_pair(&mut self.query, key, value);
        }
        self
    }

    /// Set the raw request payload.
    ///
    /// A non-empty body is sent with `Content-Type: application/json`,
    /// overriding any caller-supplied value for that header. An empty body
    /// is not attached at all.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Send the request and decode the JSON response into `T`.
    ///
    /// The HTTP status code is not inspected: any response whose body
    /// decodes into `T` is reported as success, including 4xx/5xx
    /// responses. Callers that need status enforcement should model the
    /// error shape in `T`.
    ///
    /// Transport failures are returned verbatim; a response with no body
    /// is [`ClientError::EmptyBody`]; a body that does not decode into
    /// `T` is returned as the underlying JSON error.
    pub async fn send<T: DeserializeOwned>(self) -> Result<T> {
        let bytes = self.dispatch().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Issue the request and return the raw response bytes.
    async fn dispatch(self) -> Result<Bytes> {
        let Self {
            client,
            method,
            endpoint,
            headers,
            query,
            body,
        } = self;

        let mut url = client.resolve(&endpoint)?;
        for (key, value) in &query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let mut merged = client.inner.default_headers.clone();
        for (name, value) in headers.iter() {
            merged.insert(name, value.clone());
        }

        let mut request = client
            .inner
            .transport
            .reqwest_client()
            .request(method.to_reqwest(), url);

        // Body attachment happens after header application, so the forced
        // Content-Type overrides any caller-supplied value.
        if let Some(body) = body.filter(|body| !body.is_empty()) {
            merged.insert(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            );
            request = request.body(body);
        }
        request = request.headers(merged);

        let response = request.send().await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ClientError::EmptyBody);
        }
        Ok(bytes)
    }
}

/// Builder for a `multipart/form-data` upload request.
///
/// The body is assembled as: every scalar field part in insertion order,
/// then every file part in insertion order, then the closing boundary
/// line. Query parameters are not supported for uploads.
///
/// # Example
///
/// ```ignore
/// use meridian_client::http::{MediaFile, RestClient};
///
/// let client = RestClient::new("https://api.example.com");
/// let raw = client
///     .upload("/media")
///     .field("caption", "hi")
///     .file(MediaFile::new("file", "a.png", "image/png", png_bytes))
///     .send()
///     .await?;
/// ```
pub struct UploadRequestBuilder {
    client: RestClient,
    endpoint: String,
    method: HttpMethod,
    headers: http::HeaderMap,
    fields: Vec<(String, String)>,
    media: Vec<MediaFile>,
}

impl UploadRequestBuilder {
    /// Override the HTTP method (defaults to POST).
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a header to the request. Invalid names or values are ignored.
    pub fn header(
        mut self,
        name: impl TryInto<http::HeaderName>,
        value: impl TryInto<http::HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Add a scalar form field. Fields are set by key; a repeated name
    /// overwrites the earlier value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        upsert_pair(&mut self.fields, name.into(), value.into());
        self
    }

    /// Add a file part.
    pub fn file(mut self, file: MediaFile) -> Self {
        self.media.push(file);
        self
    }

    /// Add multiple file parts.
    pub fn files(mut self, files: impl IntoIterator<Item = MediaFile>) -> Self {
        self.media.extend(files);
        self
    }

    /// Send the upload and return the raw response bytes.
    ///
    /// Upload responses vary across servers, so no JSON decoding is
    /// assumed. Transport failures are returned verbatim; a response with
    /// no body is [`ClientError::EmptyBody`].
    pub async fn send(self) -> Result<Bytes> {
        let Self {
            client,
            endpoint,
            method,
            headers,
            fields,
            media,
        } = self;

        let url = client.resolve(&endpoint)?;

        let mut body = MultipartBody::new();
        for (name, value) in &fields {
            body.field(name, value);
        }
        for file in &media {
            body.file(file);
        }

        let mut merged = client.inner.default_headers.clone();
        for (name, value) in headers.iter() {
            merged.insert(name, value.clone());
        }
        merged.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_str(&body.content_type())
                .expect("multipart boundary is always a valid header value"),
        );

        let response = client
            .inner
            .transport
            .reqwest_client()
            .request(method.to_reqwest(), url)
            .headers(merged)
            .body(body.finish())
            .send()
            .await?;

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ClientError::EmptyBody);
        }
        Ok(bytes)
    }
}

/// Insert or overwrite a pair by key, keeping first-insertion order.
fn upsert_pair(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    if let Some(pair) = pairs.iter_mut().find(|(existing, _)| *existing == key) {
        pair.1 = value;
    } else {
        pairs.push((key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_resolution() {
        let client = RestClient::new("https://api.example.com");

        let url = client.resolve("/users").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/users");

        // Endpoints without a leading slash resolve the same way.
        let url = client.resolve("users").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/users");
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let client = RestClient::new("https://api.example.com/");
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    #[should_panic(expected = "valid absolute base URL")]
    fn test_invalid_base_url_panics() {
        let _ = RestClient::new("not a url");
    }

    #[test]
    fn test_repeated_query_key_last_write_wins() {
        let client = RestClient::new("https://api.example.com");
        let request = client
            .get("/search")
            .query("page", "1")
            .query("limit", "10")
            .query("page", "2");

        assert_eq!(
            request.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_set_by_key() {
        let client = RestClient::new("https://api.example.com");
        let request = client
            .get("/users")
            .header("Accept", "text/plain")
            .header("Accept", "application/json");

        assert_eq!(
            request.headers.get("Accept").unwrap(),
            &http::HeaderValue::from_static("application/json")
        );
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn test_client_is_clone() {
        let client = RestClient::new("https://api.example.com");
        let clone = client.clone();
        assert_eq!(client.base_url(), clone.base_url());
    }
}
