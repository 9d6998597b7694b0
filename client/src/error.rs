use reqwest::{StatusCode, header::InvalidHeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A custom error type for the Postman API client.
#[derive(Error, Debug)]
pub enum PostmanError {
    /// An error occurred while making a request or reading its body.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    /// The API answered with a non-success status.
    #[error("api error: {0}")]
    Api(#[from] RequestError),
    /// An error occurred while serializing or deserializing data.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The configured base URL could not be parsed.
    #[error("invalid base url: {0}")]
    Url(#[from] url::ParseError),
    /// The API key cannot be sent as a header value.
    #[error("invalid api key: {0}")]
    InvalidApiKey(#[from] InvalidHeaderValue),
}

impl PostmanError {
    /// Returns the HTTP status associated with this error, if any.
    ///
    /// API errors carry the status of the rejected response; transport errors
    /// only have one when reqwest attached it.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PostmanError::Api(e) => Some(e.status_code),
            PostmanError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

/// An error returned by the Postman API.
///
/// Built from a non-2xx response: the status code comes from the response
/// line, `name` and `message` from the JSON error body (empty when the body
/// could not be decoded).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("status code: {status_code}, name: {name}, message: {message}")]
pub struct RequestError {
    pub status_code: u16,
    pub name: String,
    pub message: String,
}

impl RequestError {
    pub fn new(status_code: u16, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Wire shape of an error body sent by the Postman API.
///
/// ```json
/// {"error": {"name": "instanceNotFoundError", "message": "We could not find the collection you are looking for"}}
/// ```
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: ErrorDetail,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

impl ErrorResponse {
    /// Attaches the response status, producing the error handed to callers.
    pub fn into_request_error(self, status_code: u16) -> RequestError {
        RequestError::new(status_code, self.error.name, self.error.message)
    }
}
