//! Prelude module for convenient imports.
//!
//! ```ignore
//! use safetch::prelude::*;
//! ```

pub use crate::{
    DecodeError, Error, ErrorKind, Fetch, FetchExt, FetchFn, HyperFetch, Method, Outcome,
    ProcessedResponse, Request, RequestError, RequestInit, Response, Result, StatusCode, Target,
    get, header, read_blob, read_body, read_json, read_text, request,
};
pub use serde::{Deserialize, Serialize};
