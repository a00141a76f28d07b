//! Content-type driven body decoders.
//!
//! Each decoder reads the response body at most once and reports failure as a
//! [`DecodeError`] instead of panicking. Calling a decoder on a response whose
//! body was already read returns [`DecodeError::BodyUsed`].

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde_json::Value;

use crate::{DecodeError, Response};

/// An opaque binary payload with its declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Lower-cased `content-type` header, or an empty string.
    pub mime: String,
    /// Raw body bytes.
    pub bytes: Bytes,
}

impl Blob {
    /// Number of bytes in the payload.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for an empty payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A body decoded by [`read_body`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Body of an `application/json` response.
    Json(Value),
    /// Body of a `text/*` or `application/xml` response.
    Text(String),
    /// Body of any other response.
    Blob(Blob),
}

// ============================================================================
// Content-type predicates
// ============================================================================

/// The `content-type` header, lower-cased; empty when missing.
#[must_use]
pub fn content_type(resp: &Response) -> String {
    resp.header(CONTENT_TYPE.as_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// The `content-length` header as an unsigned integer.
///
/// A missing or malformed header counts as zero.
#[must_use]
pub fn content_length(resp: &Response) -> u64 {
    resp.header(CONTENT_LENGTH.as_str())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

/// The response declares a non-empty body.
#[must_use]
pub fn has_content(resp: &Response) -> bool {
    content_length(resp) > 0
}

/// `application/json`, including suffixed parameters like `; charset=utf-8`.
#[must_use]
pub fn is_json(content_type: &str) -> bool {
    starts_with_ignore_case(content_type, "application/json")
}

/// Any `text/*` type, or `application/xml`.
#[must_use]
pub fn is_text(content_type: &str) -> bool {
    starts_with_ignore_case(content_type, "text/")
        || starts_with_ignore_case(content_type, "application/xml")
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

// ============================================================================
// Decoders
// ============================================================================

/// Read the body as JSON.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] for malformed (or empty) JSON, and
/// [`DecodeError::BodyUsed`] / [`DecodeError::Read`] when the body cannot be read.
pub async fn read_json(resp: &mut Response) -> Result<Value, DecodeError> {
    let bytes = resp.body_mut().bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Read the body as UTF-8 text.
///
/// # Errors
///
/// Returns [`DecodeError::Text`] for invalid UTF-8, and
/// [`DecodeError::BodyUsed`] / [`DecodeError::Read`] when the body cannot be read.
pub async fn read_text(resp: &mut Response) -> Result<String, DecodeError> {
    let bytes = resp.body_mut().bytes().await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Read the body as an opaque binary payload.
///
/// # Errors
///
/// Returns [`DecodeError::BodyUsed`] / [`DecodeError::Read`] when the body
/// cannot be read.
pub async fn read_blob(resp: &mut Response) -> Result<Blob, DecodeError> {
    let mime = content_type(resp);
    let bytes = resp.body_mut().bytes().await?;
    Ok(Blob { mime, bytes })
}

/// Read the body with the decoder its content type calls for.
///
/// JSON and text types get their decoders; everything else, including a
/// missing content type, is read as a [`Blob`]. The `content-length` header is
/// not consulted.
///
/// # Errors
///
/// Returns the selected decoder's error.
pub async fn read_body(resp: &mut Response) -> Result<Decoded, DecodeError> {
    let content_type = content_type(resp);
    if is_json(&content_type) {
        read_json(resp).await.map(Decoded::Json)
    } else if is_text(&content_type) {
        read_text(resp).await.map(Decoded::Text)
    } else {
        read_blob(resp).await.map(Decoded::Blob)
    }
}
