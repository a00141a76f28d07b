//! HTTP response handling.
//!
//! [`Response`] exposes status and headers, and owns a one-shot [`Body`].
//! [`ProcessedResponse`] is what a successful request resolves to: the
//! response plus its decoded JSON or text content.
//!
//! # Example
//!
//! ```ignore
//! let processed = safetch::get(&client, "https://api.example.com/users/1", None).await?;
//! let user: User = processed.json_as()?;
//! ```

use http::HeaderMap;
use serde_json::Value;

use crate::Body;

/// HTTP response with status, headers, and a body readable once.
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: Body,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Body>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Single header value by name, ignoring case.
    ///
    /// Values that are not visible ASCII are treated as absent.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Status is in `[200, 400)`.
    ///
    /// This is the success predicate of the request pipeline: redirections
    /// that reach the caller count as success.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.status >= 200 && self.status < 400
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Mutable access to the body, for the decoders.
    pub const fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Returns `true` once the body has been read.
    #[must_use]
    pub const fn body_used(&self) -> bool {
        self.body.is_used()
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HeaderMap, Body) {
        (self.status, self.headers, self.body)
    }
}

impl<B: Into<Body>> From<http::Response<B>> for Response {
    fn from(response: http::Response<B>) -> Self {
        let (parts, body) = response.into_parts();
        Self::new(parts.status.as_u16(), parts.headers, body)
    }
}

/// A response that went through the request pipeline successfully.
///
/// At most one of `json` and `text` is set, depending on the declared
/// content type; both are `None` for empty bodies and other content types.
#[derive(Debug)]
pub struct ProcessedResponse {
    /// The response, with its body consumed if it was decoded.
    pub resp: Response,
    /// Decoded body of an `application/json` response.
    pub json: Option<Value>,
    /// Decoded body of a `text/*` or `application/xml` response.
    pub text: Option<String>,
}

impl ProcessedResponse {
    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.resp.status()
    }

    /// Deserialize the decoded JSON body into a typed value.
    ///
    /// Returns `None` when no JSON body was decoded.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let user: User = processed.json_as().expect("json body")?;
    /// ```
    pub fn json_as<T: serde::de::DeserializeOwned>(&self) -> Option<crate::Result<T>> {
        self.json.as_ref().map(crate::from_json_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> Response {
        Response::new(status, HeaderMap::new(), Body::empty())
    }

    #[test]
    fn response_basic() {
        let response: Response = http::Response::builder()
            .status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"id":1}"#)
            .expect("valid response")
            .into();

        assert_eq!(response.status(), 200);
        assert!(response.ok());
        assert!(response.is_success());
        assert!(!response.body_used());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let response: Response = http::Response::builder()
            .header("Content-Type", "text/plain")
            .body("")
            .expect("valid response")
            .into();

        assert_eq!(response.header("content-type"), Some("text/plain"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("text/plain"));
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn ok_covers_success_and_redirection() {
        assert!(!response(199).ok());
        assert!(response(200).ok());
        assert!(response(204).ok());
        assert!(response(304).ok());
        assert!(response(399).ok());
        assert!(!response(400).ok());
        assert!(!response(404).ok());
        assert!(!response(500).ok());
    }

    #[test]
    fn response_status_checks() {
        assert!(response(301).is_redirection());
        assert!(response(404).is_client_error());
        assert!(response(500).is_server_error());
    }

    #[test]
    fn processed_response_json_as() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct User {
            id: u64,
            name: String,
        }

        let processed = ProcessedResponse {
            resp: response(200),
            json: Some(serde_json::json!({"id": 1, "name": "test"})),
            text: None,
        };

        let user: User = processed
            .json_as()
            .expect("json body")
            .expect("deserialize");
        assert_eq!(
            user,
            User {
                id: 1,
                name: "test".to_string()
            }
        );
        assert_eq!(processed.status(), 200);

        let processed = ProcessedResponse {
            resp: response(204),
            json: None,
            text: None,
        };
        assert!(processed.json_as::<User>().is_none());
    }
}
