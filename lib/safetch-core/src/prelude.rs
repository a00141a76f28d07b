//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use safetch_core::prelude::*;
//! ```

pub use crate::{
    DecodeError, Error, Fetch, FetchFn, Method, Outcome, ProcessedResponse, Request, RequestError,
    RequestInit, Response, Result, Target, read_blob, read_json, read_text,
};
