//! Core types and traits for safetch, a non-throwing HTTP request layer.
//!
//! This crate provides the foundational types used by safetch:
//! - [`Method`] - HTTP method enum
//! - [`Request`], [`RequestBuilder`], [`RequestInit`] and [`Target`] - what to send
//! - [`Response`] and its one-shot [`Body`] - what came back
//! - [`Fetch`] - the transport primitive the pipeline is built on
//! - [`read_json`], [`read_text`], [`read_blob`], [`read_body`] - body decoders
//! - [`RequestError`], [`DecodeError`] and [`Error`] - failure taxonomy
//! - [`Outcome`] - the result of a whole request
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod body;
mod client;
mod decode;
mod error;
mod method;
pub mod prelude;
mod request;
mod response;

pub use body::{Body, BoxError, from_json, from_json_value, to_json};
pub use client::{Fetch, FetchFn};
pub use decode::{
    Blob, Decoded, content_length, content_type, has_content, is_json, is_text, read_blob,
    read_body, read_json, read_text,
};
pub use error::{DecodeError, Error, ErrorKind, RequestError, Result};
pub use method::Method;
pub use request::{Request, RequestBuilder, RequestInit, Target};
pub use response::{ProcessedResponse, Response};

// Re-export http crate types for status codes and headers
pub use http::{HeaderMap, StatusCode, header};

/// Result of a request: the processed response, or exactly one classified error.
pub type Outcome = std::result::Result<ProcessedResponse, RequestError>;
