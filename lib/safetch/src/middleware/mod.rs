//! Tower middleware for [`HyperFetch`](crate::HyperFetch).
//!
//! Layers wrap the transport, not the request pipeline: they see every
//! request before it is sent and every response before its body is read, so
//! they must not consume the body. Layers added last run first.
//!
//! - [`LoggingLayer`] - logs requests and responses using `tracing`
//!
//! Any tower layer whose service speaks `Request<Bytes>` to
//! [`Response`](crate::Response) with [`Error`](crate::Error) can be added
//! through [`HyperFetchBuilder::layer`](crate::HyperFetchBuilder::layer).
//!
//! ```ignore
//! use safetch::HyperFetch;
//! use safetch::middleware::LoggingLayer;
//!
//! let client = HyperFetch::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower utilities for composing layers by hand
pub use tower::{Layer, ServiceBuilder};
