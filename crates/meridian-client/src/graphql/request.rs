//! GraphQL wire request types.

use serde::Serialize;
use serde_json::{Map, Value};

/// The JSON payload of an outgoing GraphQL request.
///
/// Serialized once per request. The `variables` key is omitted entirely
/// when no variables were supplied.
#[derive(Clone, Debug, Serialize)]
pub struct GraphQLRequest {
    /// The GraphQL query string.
    pub query: String,

    /// Variables referenced by the query, keyed by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl GraphQLRequest {
    /// Create a request with no variables.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }

    /// Set a variable value.
    ///
    /// Values of different types can live under one key space; each is
    /// serialized with its own type's JSON representation. A value that
    /// fails to serialize is skipped.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let request = GraphQLRequest::new("query($id: ID!, $limit: Int) { ... }")
    ///     .variable("id", "123")
    ///     .variable("limit", 10);
    /// ```
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.variables
                    .get_or_insert_with(Map::new)
                    .insert(name.into(), value);
            }
            Err(e) => {
                tracing::error!(target: "meridian_client::graphql", "Failed to serialize variable: {}", e);
            }
        }
        self
    }

    /// Set all variables from a serializable value.
    ///
    /// The value must serialize to a JSON object; anything else is skipped.
    pub fn variables(mut self, variables: impl Serialize) -> Self {
        match serde_json::to_value(variables) {
            Ok(Value::Object(map)) => self.variables = Some(map),
            Ok(_) => {
                tracing::error!(target: "meridian_client::graphql", "Variables must serialize to a JSON object");
            }
            Err(e) => {
                tracing::error!(target: "meridian_client::graphql", "Failed to serialize variables: {}", e);
            }
        }
        self
    }
}
