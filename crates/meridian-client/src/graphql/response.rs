//! GraphQL response envelope types.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{ClientError, Result};

/// A single error entry returned by a GraphQL server.
///
/// Servers attach varying metadata (locations, paths, extensions); only
/// the message is carried, and unknown fields are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphQLErrorEntry {
    /// The error message.
    pub message: String,
}

/// The `{data, errors}` envelope wrapping every GraphQL response.
///
/// The data is held as a raw JSON value so the envelope decodes even when
/// the server returns errors alongside partial or mismatched data.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphQLResponse {
    /// The data returned by the operation, if any.
    #[serde(default)]
    pub data: Option<Value>,

    /// Errors reported by the server, if any.
    #[serde(default)]
    pub errors: Option<Vec<GraphQLErrorEntry>>,
}

impl GraphQLResponse {
    /// Check whether the server reported any errors.
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    /// Every reported error message joined with `", "`.
    pub fn error_message(&self) -> Option<String> {
        let errors = self.errors.as_ref()?;
        if errors.is_empty() {
            return None;
        }
        Some(
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Resolve the envelope into the decoded data.
    ///
    /// Server errors take precedence: if any are present the data is
    /// ignored and the combined message is returned as
    /// [`ClientError::Graphql`]. An envelope with neither data nor errors
    /// is [`ClientError::UnknownResponse`].
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if let Some(message) = self.error_message() {
            return Err(ClientError::Graphql(message));
        }
        match self.data {
            Some(data) => Ok(serde_json::from_value(data)?),
            None => Err(ClientError::UnknownResponse),
        }
    }
}
