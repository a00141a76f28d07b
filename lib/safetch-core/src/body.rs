//! Response bodies and JSON helpers.

use std::fmt;

use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full};

use crate::{DecodeError, Result};

/// Boxed error produced by a body stream.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A response body that can be read at most once.
///
/// Transports hand over the raw body without buffering it; the first reader
/// takes it. Every later read fails with [`DecodeError::BodyUsed`].
pub struct Body {
    inner: Option<BoxBody<Bytes, BoxError>>,
}

impl Body {
    /// An empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_boxed(Empty::<Bytes>::new().map_err(|never| match never {}).boxed())
    }

    /// Wrap a boxed `http-body` stream, typically straight from a transport.
    #[must_use]
    pub fn from_boxed(body: BoxBody<Bytes, BoxError>) -> Self {
        Self { inner: Some(body) }
    }

    /// Returns `true` once the body has been taken by a reader.
    #[must_use]
    pub const fn is_used(&self) -> bool {
        self.inner.is_none()
    }

    /// Take the body and buffer it entirely.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BodyUsed`] if the body was already taken, or
    /// [`DecodeError::Read`] if the underlying stream fails.
    pub async fn bytes(&mut self) -> std::result::Result<Bytes, DecodeError> {
        let body = self.inner.take().ok_or(DecodeError::BodyUsed)?;
        let collected = body
            .collect()
            .await
            .map_err(|err| DecodeError::Read(err.to_string()))?;
        Ok(collected.to_bytes())
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("used", &self.is_used())
            .finish_non_exhaustive()
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::from_boxed(Full::new(bytes).map_err(|never| match never {}).boxed())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from(Bytes::from(bytes))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::from(Bytes::from(text))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::from(Bytes::from_static(text.as_bytes()))
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use safetch_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "user.address.city").
///
/// # Example
///
/// ```
/// use safetch_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let user: User = from_json(br#"{"name":"Alice"}"#).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Deserialize an already-decoded JSON value, with the same path-aware errors
/// as [`from_json`].
///
/// # Errors
///
/// Returns an error if the value does not match `T`.
pub fn from_json_value<T: serde::de::DeserializeOwned>(value: &serde_json::Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}
