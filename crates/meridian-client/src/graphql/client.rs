//! GraphQL client implementation.

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use super::request::GraphQLRequest;
use super::response::GraphQLResponse;
use crate::error::{ClientError, Result};
use crate::http::{HttpClient, HttpMethod};

/// Builder for creating a GraphQL client.
pub struct GraphQLClientBuilder {
    endpoint: String,
    http_client: Option<HttpClient>,
    default_headers: http::HeaderMap,
}

impl GraphQLClientBuilder {
    /// Create a new builder with the specified GraphQL endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
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

    /// Build the GraphQL client.
    ///
    /// # Panics
    ///
    /// Panics if the endpoint is not a valid absolute URL. An invalid
    /// endpoint is a configuration error, not a runtime fault.
    pub fn build(self) -> GraphQLClient {
        let endpoint =
            Url::parse(&self.endpoint).expect("GraphQLClient requires a valid absolute endpoint URL");

        GraphQLClient {
            inner: Arc::new(GraphQLClientInner {
                transport: self.http_client.unwrap_or_default(),
                endpoint,
                default_headers: self.default_headers,
            }),
        }
    }
}

/// Internal state for the GraphQL client.
struct GraphQLClientInner {
    transport: HttpClient,
    endpoint: Url,
    default_headers: http::HeaderMap,
}

/// A client for a single GraphQL endpoint.
///
/// Each call serializes a `{query, variables}` payload, issues one HTTP
/// request, and resolves the `{data, errors}` envelope into either the
/// decoded data or a combined error message.
///
/// # Example
///
/// ```ignore
/// use meridian_client::graphql::GraphQLClient;
///
/// let client = GraphQLClient::new("https://api.example.com/graphql");
///
/// let viewer: Viewer = client.query("{ viewer { id } }").await?;
///
/// let user: User = client
///     .request("query($id: ID!) { user(id: $id) { id name } }")
///     .variable("id", "123")
///     .send()
///     .await?;
/// ```
#[derive(Clone)]
pub struct GraphQLClient {
    inner: Arc<GraphQLClientInner>,
}

impl GraphQLClient {
    /// Create a GraphQL client with the specified endpoint URL and an
    /// ambient HTTP transport.
    ///
    /// # Panics
    ///
    /// Panics if the endpoint is not a valid absolute URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::builder(endpoint).build()
    }

    /// Create a new builder for configuring a GraphQL client.
    pub fn builder(endpoint: impl Into<String>) -> GraphQLClientBuilder {
        GraphQLClientBuilder::new(endpoint)
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint.as_str()
    }

    /// Create a request builder for the given query.
    pub fn request(&self, query: impl Into<String>) -> GraphQLRequestBuilder {
        GraphQLRequestBuilder {
            client: self.clone(),
            request: GraphQLRequest::new(query),
            method: HttpMethod::Post,
            headers: http::HeaderMap::new(),
            query_params: Vec::new(),
        }
    }

    /// Execute a query with no variables and decode the result.
    pub async fn query<T: DeserializeOwned>(&self, query: impl Into<String>) -> Result<T> {
        self.request(query).send().await
    }

    /// Execute a query with variables and decode the result.
    pub async fn query_with_variables<T: DeserializeOwned>(
        &self,
        query: impl Into<String>,
        variables: impl Serialize,
    ) -> Result<T> {
        self.request(query).variables(variables).send().await
    }
}

impl std::fmt::Debug for GraphQLClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish()
    }
}

/// Builder for a single GraphQL request.
pub struct GraphQLRequestBuilder {
    client: GraphQLClient,
    request: GraphQLRequest,
    method: HttpMethod,
    headers: http::HeaderMap,
    query_params: Vec<(String, String)>,
}

impl GraphQLRequestBuilder {
    /// Set a variable value. See [`GraphQLRequest::variable`].
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        self.request = self.request.variable(name, value);
        self
    }

    /// Set all variables from a serializable value. See
    /// [`GraphQLRequest::variables`].
    pub fn variables(mut self, variables: impl Serialize) -> Self {
        self.request = self.request.variables(variables);
        self
    }

    /// Override the HTTP method (defaults to POST).
    ///
    /// The `{query, variables}` payload only travels on POST requests;
    /// for any other method no body is sent and the query and variables
    /// are silently ignored.
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

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

    /// Add a query parameter to the endpoint URL. Parameters are set by
    /// key; a repeated key overwrites the earlier value.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        if let Some(pair) = self.query_params.iter_mut().find(|(k, _)| *k == key) {
            pair.1 = value;
        } else {
            self.query_params.push((key, value));
        }
        self
    }

    /// Send the request and resolve the response envelope into `T`.
    ///
    /// Transport failures are returned verbatim; a response with no body
    /// is [`ClientError::EmptyBody`]; an envelope that does not decode is
    /// returned as the underlying JSON error. A decoded envelope resolves
    /// per [`GraphQLResponse::into_data`].
    pub async fn send<T: DeserializeOwned>(self) -> Result<T> {
        let Self {
            client,
            request,
            method,
            headers,
            query_params,
        } = self;
        let inner = &client.inner;

        let mut url = inner.endpoint.clone();
        for (key, value) in &query_params {
            url.query_pairs_mut().append_pair(key, value);
        }

        let mut merged = inner.default_headers.clone();
        for (name, value) in headers.iter() {
            merged.insert(name, value.clone());
        }

        let mut builder = inner
            .transport
            .reqwest_client()
            .request(method.to_reqwest(), url);

        if method == HttpMethod::Post {
            let body = serde_json::to_vec(&request)?;
            merged.insert(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            );
            builder = builder.body(body);
        }
        builder = builder.headers(merged);

        let response = builder.send().await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ClientError::EmptyBody);
        }

        let envelope: GraphQLResponse = serde_json::from_slice(&bytes)?;
        envelope.into_data()
    }
}
