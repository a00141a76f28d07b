//! HTTP request descriptors.
//!
//! A call is described by a [`Target`] (a URL or a pre-built [`Request`]) and
//! an optional [`RequestInit`] bag of overrides, in the shape of a fetch call.
//!
//! # Example
//!
//! ```
//! use safetch_core::{Method, Request, RequestInit, Target};
//!
//! let init = RequestInit::new()
//!     .method(Method::Post)
//!     .header("Accept", "application/json")
//!     .body("ping");
//!
//! let request = Target::from("https://api.example.com/ping")
//!     .into_request(init)
//!     .expect("valid url");
//!
//! assert_eq!(request.method(), Method::Post);
//! assert_eq!(request.header("Accept"), Some("application/json"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::Method;

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// Reassemble a request from its parts.
    #[must_use]
    pub fn from_parts(
        method: Method,
        url: url::Url,
        headers: HashMap<String, String>,
        body: Option<B>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }
}

// ============================================================================
// Request Init
// ============================================================================

/// Optional per-call overrides, applied on top of the [`Target`].
///
/// Every field that is set replaces the corresponding part of the target
/// request; `headers` replaces the whole header map. Unset fields leave the
/// target untouched.
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    /// HTTP method override.
    pub method: Option<Method>,
    /// Header map override.
    pub headers: Option<HashMap<String, String>>,
    /// Request payload override.
    pub body: Option<Bytes>,
}

impl RequestInit {
    /// An empty set of overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.get_or_insert_with(HashMap::new).extend(headers);
        self
    }

    /// Sets the request payload.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON payload along with its `Content-Type` header.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }

    /// Apply these overrides to a request.
    #[must_use]
    pub fn apply(self, request: Request<Bytes>) -> Request<Bytes> {
        let (method, url, headers, body) = request.into_parts();
        Request::from_parts(
            self.method.unwrap_or(method),
            url,
            self.headers.unwrap_or(headers),
            self.body.or(body),
        )
    }
}

// ============================================================================
// Target
// ============================================================================

/// What a call is aimed at: a URL, or a request built ahead of time.
#[derive(Debug, Clone)]
pub enum Target {
    /// A URL, parsed when the call is made.
    Url(String),
    /// A complete request.
    Request(Request<Bytes>),
}

impl Target {
    /// Resolve into the request to send, with `init` applied on top.
    ///
    /// A bare URL starts as a `GET` request with no headers and no body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if the URL
    /// cannot be parsed.
    pub fn into_request(self, init: RequestInit) -> crate::Result<Request<Bytes>> {
        let request = match self {
            Self::Url(raw) => {
                let url = url::Url::parse(&raw)?;
                Request::builder(Method::default(), url).build()
            }
            Self::Request(request) => request,
        };
        Ok(init.apply(request))
    }
}

impl From<&str> for Target {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<String> for Target {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

impl From<&String> for Target {
    fn from(url: &String) -> Self {
        Self::Url(url.clone())
    }
}

impl From<url::Url> for Target {
    fn from(url: url::Url) -> Self {
        Self::Request(Request::builder(Method::default(), url).build())
    }
}

impl From<Request<Bytes>> for Target {
    fn from(request: Request<Bytes>) -> Self {
        Self::Request(request)
    }
}
