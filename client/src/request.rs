pub mod path;

use log::debug;
use reqwest::{
    Method, Response, Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use std::{marker::PhantomData, time::Duration};

use crate::{
    client::{API_KEY_HEADER, PostmanClient},
    error::{ErrorResponse, PostmanError},
};

/// Represents the state where no HTTP method has been chosen yet
pub struct NoMethod;
/// Represents the state where the HTTP method is set and the request can be sent
pub struct MethodSet;
/// Represents the state where no output type has been chosen for the response body
pub struct NoOutput;

/// Builder for a single request to the Postman API
///
/// Created by [`PostmanClient::request`] with the `X-API-Key` header already
/// in place. Every setter consumes the builder and returns it, so calls can be
/// chained; the request is only sent by [send](PostmanRequest::send) or
/// [send_and_parse](PostmanRequest::send_and_parse).
///
/// # Type Parameters
///
/// * `M` - Method state (NoMethod or MethodSet). Only `MethodSet` requests can be sent.
/// * `O` - Type the response body is decoded into, or `NoOutput`
pub struct PostmanRequest<'c, M, O = NoOutput> {
    client: &'c PostmanClient,
    method: Method,
    resource: String,
    headers: HeaderMap,
    body: Option<Result<Vec<u8>, serde_json::Error>>,
    timeout: Option<Duration>,
    state: PhantomData<(M, fn() -> O)>,
}

impl<'c> PostmanRequest<'c, NoMethod> {
    pub(crate) fn new(client: &'c PostmanClient, api_key: HeaderValue) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
        Self {
            client,
            method: Method::GET,
            resource: "/".to_string(),
            headers,
            body: None,
            timeout: None,
            state: PhantomData,
        }
    }
}

impl<'c, M, O> PostmanRequest<'c, M, O> {
    fn into_state<M2, O2>(self) -> PostmanRequest<'c, M2, O2> {
        PostmanRequest {
            client: self.client,
            method: self.method,
            resource: self.resource,
            headers: self.headers,
            body: self.body,
            timeout: self.timeout,
            state: PhantomData,
        }
    }

    /// Sets the HTTP method of the request
    pub fn method(mut self, method: Method) -> PostmanRequest<'c, MethodSet, O> {
        self.method = method;
        self.into_state()
    }

    pub fn get(self) -> PostmanRequest<'c, MethodSet, O> {
        self.method(Method::GET)
    }

    pub fn post(self) -> PostmanRequest<'c, MethodSet, O> {
        self.method(Method::POST)
    }

    pub fn put(self) -> PostmanRequest<'c, MethodSet, O> {
        self.method(Method::PUT)
    }

    pub fn delete(self) -> PostmanRequest<'c, MethodSet, O> {
        self.method(Method::DELETE)
    }

    /// Sets the path of the request from one or more segments
    ///
    /// Segments are joined with `/` and the result is cleaned, so
    /// `["collections", "", "./abc"]` and `["collections/abc"]` both address
    /// `/collections/abc`. See [`path::join`].
    pub fn resource<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.resource = path::join(segments);
        self
    }

    /// Appends a header to the request
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets a JSON request body
    ///
    /// Serialization errors are kept until the request is sent and then
    /// returned as `PostmanError::Serde`.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(serde_json::to_vec(body));
        self
    }

    /// Sets a deadline for the whole request, from connecting until the body
    /// has been read
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the type the response body is decoded into by
    /// [send_and_parse](PostmanRequest::send_and_parse)
    pub fn output<T: DeserializeOwned>(self) -> PostmanRequest<'c, M, T> {
        self.into_state()
    }

    /// Returns the complete URL for the current request
    ///
    /// The client's base URL with its path replaced by the resource path.
    pub fn url(&self) -> Url {
        let mut url = self.client.base_url().clone();
        url.set_path(&self.resource);
        url
    }

    pub fn path(&self) -> &str {
        &self.resource
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl<O> PostmanRequest<'_, MethodSet, O> {
    pub fn http_method(&self) -> &Method {
        &self.method
    }

    /// Sends the request and checks the response status
    ///
    /// # Returns
    ///
    /// The raw `reqwest::Response` for any 2xx status, body unread.
    ///
    /// # Errors
    ///
    /// * `PostmanError::Api` for a non-2xx status, carrying the status code and
    ///   the name/message from the JSON error body
    /// * `PostmanError::Request` when the call itself or reading the error body fails
    /// * `PostmanError::Serde` when the JSON request body could not be serialized
    pub async fn send(self) -> Result<Response, PostmanError> {
        let url = self.url();
        debug!("{} {}", self.method, url);

        let mut request = self
            .client
            .http_client()
            .request(self.method, url)
            .headers(self.headers);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = self.body {
            request = request.body(body?);
        }

        let response = request.send().await?;
        error_for_status(response).await
    }
}

impl<O: DeserializeOwned> PostmanRequest<'_, MethodSet, O> {
    /// Sends the request and decodes a successful response body into `O`
    ///
    /// An empty body is decoded as JSON `null`, so `Option<_>` outputs work
    /// for endpoints that answer without content.
    pub async fn send_and_parse(self) -> Result<O, PostmanError> {
        let body = self.send().await?.bytes().await?;
        decode_body(&body)
    }
}

/// Translates a non-2xx response into `PostmanError::Api`
async fn error_for_status(response: Response) -> Result<Response, PostmanError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await?;
    let error = serde_json::from_slice::<ErrorResponse>(&body).unwrap_or_else(|e| {
        debug!("could not decode error body for status {status}: {e}");
        ErrorResponse::default()
    });
    let error = error.into_request_error(status.as_u16());
    debug!("request failed: {error}");
    Err(error.into())
}

fn decode_body<O: DeserializeOwned>(body: &[u8]) -> Result<O, PostmanError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    Ok(serde_json::from_slice(body)?)
}
