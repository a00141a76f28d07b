//! Non-throwing HTTP requests.
//!
//! Every call performs exactly one request and resolves to an [`Outcome`]:
//! either a [`ProcessedResponse`] with the body already decoded according to
//! its content type, or exactly one [`RequestError`]:
//!
//! - [`RequestError::Network`] - the request never reached the server
//! - [`RequestError::Http`] - the server answered with a status outside `[200, 400)`
//! - [`RequestError::Post`] - the status was fine but the body did not decode
//!
//! # Example
//!
//! ```ignore
//! use safetch::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let client = HyperFetch::new();
//! match safetch::get(&client, "https://api.example.com/users/42", None).await {
//!     Ok(processed) => {
//!         let user: User = processed.json_as()?;
//!         println!("{user:?}");
//!     }
//!     Err(err) => eprintln!("{} error: {err}", err.kind()),
//! }
//! ```
//!
//! Any [`Fetch`] implementation can stand in for [`HyperFetch`], which makes
//! the pipeline easy to drive from tests with a [`FetchFn`].

mod client;
mod config;
mod connector;
pub mod middleware;
mod pipeline;
pub mod prelude;

pub use client::{BoxedService, HyperFetch, HyperFetchBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use pipeline::{FetchExt, classify, get, invoke, request};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use safetch_core::{
    Blob, Body, BoxError, DecodeError, Decoded, Error, ErrorKind, Fetch, FetchFn, Method, Outcome,
    ProcessedResponse, Request, RequestBuilder, RequestError, RequestInit, Response, Result,
    Target, content_length, content_type, from_json, from_json_value, has_content, is_json,
    is_text, read_blob, read_body, read_json, read_text, to_json,
};

// Re-export http types for status codes and headers
pub use safetch_core::{HeaderMap, StatusCode, header};

pub use url;
