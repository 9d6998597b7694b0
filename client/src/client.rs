use reqwest::{Client, Url, header::HeaderValue};

use crate::{
    config::{ClientConfig, DEFAULT_BASE_URL},
    error::PostmanError,
    request::{MethodSet, NoMethod, PostmanRequest},
};

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "x-api-key";

/// A client for interacting with the Postman API
///
/// Wraps a reqwest::Client together with the base URL and API key shared by
/// all requests. Cloning is cheap: the underlying reqwest client is reference
/// counted.
#[derive(Clone, Debug)]
pub struct PostmanClient {
    client: Client,
    base_url: Url,
    api_key: HeaderValue,
}

impl PostmanClient {
    /// Creates a client for the public Postman API
    ///
    /// # Errors
    ///
    /// Returns `PostmanError::InvalidApiKey` if the key contains characters that
    /// are not allowed in a header value.
    pub fn new(api_key: impl AsRef<str>) -> Result<PostmanClient, PostmanError> {
        let mut api_key = HeaderValue::from_str(api_key.as_ref())?;
        api_key.set_sensitive(true);
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            api_key,
        })
    }

    /// Builds a client from a [`ClientConfig`], honoring its timeout
    pub fn from_config(config: &ClientConfig) -> Result<PostmanClient, PostmanError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new(&config.api_key)?
            .with_base_url(&config.base_url)?
            .with_http_client(builder.build()?))
    }

    /// Points the client at a different API host
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, PostmanError> {
        self.base_url = Url::parse(base_url)?;
        Ok(self)
    }

    /// Replaces the transport used to execute requests
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    /// Starts a new request with the API key header already attached
    ///
    /// # Returns
    ///
    /// A `PostmanRequest` without a method. Pick one with
    /// [method](PostmanRequest::method) or a shorthand such as
    /// [get](PostmanRequest::get) before sending.
    pub fn request(&self) -> PostmanRequest<'_, NoMethod> {
        PostmanRequest::new(self, self.api_key.clone())
    }

    /// Starts a new GET request
    pub fn get(&self) -> PostmanRequest<'_, MethodSet> {
        self.request().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_public_api() {
        let client = PostmanClient::new("PMAK-abc").unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.getpostman.com/");
    }

    #[test]
    fn test_api_key_is_hidden_from_debug() {
        let client = PostmanClient::new("PMAK-secret").unwrap();
        assert!(!format!("{client:?}").contains("PMAK-secret"));
    }

    #[test]
    fn test_invalid_api_key_is_rejected() {
        let err = PostmanClient::new("bad\nkey").unwrap_err();
        assert!(matches!(err, PostmanError::InvalidApiKey(_)));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = PostmanClient::new("k")
            .unwrap()
            .with_base_url("not a url")
            .unwrap_err();
        assert!(matches!(err, PostmanError::Url(_)));
    }

    #[test]
    fn test_from_config() {
        let mut config = ClientConfig::new("k");
        config.base_url = "http://localhost:8080".to_string();
        config.timeout_secs = Some(3);
        let client = PostmanClient::from_config(&config).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/");
    }
}
