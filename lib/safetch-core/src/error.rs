//! Error types for safetch.
//!
//! Three layers of failure, each recovered where it happens:
//! - [`Error`] - the transport could not produce a response (or the request was unusable)
//! - [`DecodeError`] - a response body could not be read as its content type promised
//! - [`RequestError`] - the classified outcome of a whole call: `network`, `http` or `post`

use derive_more::{Display, Error, From};
use serde_json::Value;

use crate::Response;

// ============================================================================
// Transport Error
// ============================================================================

/// Transport-level error, reported by [`Fetch`](crate::Fetch) implementations.
///
/// The request pipeline never surfaces this type directly: every transport
/// failure collapses to [`RequestError::Network`].
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

// ============================================================================
// Decode Error
// ============================================================================

/// Failure while interpreting a response body according to its content type.
#[derive(Debug, Display, Error, From)]
pub enum DecodeError {
    /// The body was already read by an earlier decoder.
    #[display("response body already consumed")]
    #[from(skip)]
    BodyUsed,

    /// The body stream failed before it was fully received.
    #[display("failed to read response body: {_0}")]
    #[from(skip)]
    Read(#[error(not(source))] String),

    /// The body is not valid JSON.
    #[display("invalid JSON body: {_0}")]
    #[from]
    Json(serde_json::Error),

    /// The body is not valid UTF-8 text.
    #[display("invalid text body: {_0}")]
    #[from]
    Text(std::string::FromUtf8Error),
}

impl DecodeError {
    /// Returns `true` if the body had already been consumed.
    #[must_use]
    pub const fn is_body_used(&self) -> bool {
        matches!(self, Self::BodyUsed)
    }
}

// ============================================================================
// Request Error
// ============================================================================

/// The three kinds of failure a request can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// The request never reached the server.
    #[display("network")]
    Network,
    /// The server answered with a status outside `[200, 400)`.
    #[display("http")]
    Http,
    /// The status was fine but the body could not be decoded.
    #[display("post")]
    Post,
}

/// Classified failure of a request.
///
/// Exactly one variant describes any failed call; a successful call never
/// produces one.
#[derive(Debug, Display, Error)]
pub enum RequestError {
    /// The request wasn't able to reach the server (offline, DNS, refused
    /// connection, TLS failure, unusable URL).
    #[display("network error: the request did not reach the server")]
    Network,

    /// The server returned a status code outside of `[200, 400)`.
    ///
    /// Whatever body content was decoded is kept for diagnostics.
    #[display("HTTP error {}", resp.status())]
    Http {
        /// The response, with its body already consumed when it was decoded.
        resp: Response,
        /// Decoded JSON body, for `application/json` responses.
        json: Option<Value>,
        /// Decoded text body, for `text/*` and `application/xml` responses.
        text: Option<String>,
    },

    /// The server returned a successful status, but the body could not be
    /// decoded as its content type declared.
    #[display("post-processing error (status {}): {error}", resp.status())]
    Post {
        /// The response, with its body consumed.
        resp: Response,
        /// The decode failure.
        #[error(source)]
        error: DecodeError,
    },
}

impl RequestError {
    /// Which of the three failure kinds this is.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network => ErrorKind::Network,
            Self::Http { .. } => ErrorKind::Http,
            Self::Post { .. } => ErrorKind::Post,
        }
    }

    /// Returns `true` for [`RequestError::Network`].
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Returns `true` for [`RequestError::Http`].
    #[must_use]
    pub const fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Returns `true` for [`RequestError::Post`].
    #[must_use]
    pub const fn is_post(&self) -> bool {
        matches!(self, Self::Post { .. })
    }

    /// The response, when the server answered at all.
    #[must_use]
    pub const fn response(&self) -> Option<&Response> {
        match self {
            Self::Network => None,
            Self::Http { resp, .. } | Self::Post { resp, .. } => Some(resp),
        }
    }

    /// The response status code, when the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(Response::status)
    }

    /// Try to decode the diagnostics of an HTTP error into a typed value.
    ///
    /// Uses the decoded JSON body if there is one, otherwise tries to parse
    /// the decoded text body as JSON. Returns `None` for other variants or
    /// when nothing was decoded.
    ///
    /// # Example
    ///
    /// ```ignore
    /// #[derive(Debug, Deserialize)]
    /// struct ApiError {
    ///     code: String,
    ///     message: String,
    /// }
    ///
    /// if let Err(err) = safetch::get(&client, url, None).await {
    ///     if let Some(Ok(api_error)) = err.decode_json::<ApiError>() {
    ///         eprintln!("API error: {} - {}", api_error.code, api_error.message);
    ///     }
    /// }
    /// ```
    pub fn decode_json<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        match self {
            Self::Http {
                json: Some(json), ..
            } => Some(crate::from_json_value(json)),
            Self::Http {
                text: Some(text), ..
            } => Some(crate::from_json(text.as_bytes())),
            _ => None,
        }
    }
}
