//! Request context handed to every route handler.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{HeaderMap, Method, StatusCode, Uri},
};
use serde::de::DeserializeOwned;

use crate::app::errors::HandlerError;

/// Owned view of one inbound request: method, URI, headers, path parameters
/// and the fully buffered body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    params: HashMap<String, String>,
    body: Bytes,
}

impl ApiRequest {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            params: HashMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Buffer an axum request. Body-size and body-read failures are rejections.
    pub(crate) async fn from_request(req: Request) -> Result<Self, HandlerError> {
        let (mut parts, body) = req.into_parts();

        // Routes without captures carry no params; that is not an error here.
        let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, &())
            .await
            .map(|Path(params)| params)
            .unwrap_or_default();

        let method = parts.method.clone();
        let uri = parts.uri.clone();
        let headers = parts.headers.clone();

        let body = Bytes::from_request(Request::from_parts(parts, body), &())
            .await
            .map_err(|rejection| HandlerError::rejected(rejection.status(), rejection.body_text()))?;

        Ok(Self {
            method,
            uri,
            headers,
            params,
            body,
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as text; `None` when absent or not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Path capture (`/orders/:id` → `param("id")`).
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Deserialize the query string.
    pub fn query<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        Query::<T>::try_from_uri(&self.uri)
            .map(|Query(value)| value)
            .map_err(|rejection| HandlerError::rejected(rejection.status(), rejection.body_text()))
    }

    /// Deserialize the body as JSON. An empty body reads as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        let raw: &[u8] = if self.body.is_empty() { b"null" } else { &self.body[..] };
        serde_json::from_slice(raw).map_err(|e| {
            HandlerError::rejected(StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}"))
        })
    }

    /// Deserialize an `application/x-www-form-urlencoded` body.
    pub fn form<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_urlencoded::from_bytes(&self.body).map_err(|e| {
            HandlerError::rejected(StatusCode::UNPROCESSABLE_ENTITY, format!("invalid form body: {e}"))
        })
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as UTF-8 text (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
