//! The transport primitive.
//!
//! - [`Fetch`] - sends one request and yields a [`Response`], or fails
//! - [`FetchFn`] - adapts an async closure into a [`Fetch`]
//!
//! The request pipeline only ever sees this trait, so any HTTP stack (or an
//! in-memory fake) can sit underneath it.

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Transport primitive: send a request, get a response.
///
/// Implementations decide everything about the wire (DNS, TLS, pooling).
/// They should not read the response body; that is left to the decoders.
pub trait Fetch: Send + Sync {
    /// Send the request once.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Invalid request
    fn fetch(&self, request: Request<Bytes>) -> impl Future<Output = Result<Response>> + Send;
}

impl<T: Fetch> Fetch for &T {
    fn fetch(&self, request: Request<Bytes>) -> impl Future<Output = Result<Response>> + Send {
        (**self).fetch(request)
    }
}

impl<T: Fetch> Fetch for Arc<T> {
    fn fetch(&self, request: Request<Bytes>) -> impl Future<Output = Result<Response>> + Send {
        (**self).fetch(request)
    }
}

/// A [`Fetch`] backed by a closure.
///
/// # Example
///
/// ```
/// use safetch_core::{Error, FetchFn, Response};
///
/// let offline = FetchFn::new(|_request| async { Err::<Response, _>(Error::connection("offline")) });
/// ```
#[derive(Clone, Copy)]
pub struct FetchFn<F>(F);

impl<F> FetchFn<F> {
    /// Wrap a closure.
    pub fn new<Fut>(f: F) -> Self
    where
        F: Fn(Request<Bytes>) -> Fut + Send + Sync,
        Fut: Future<Output = Result<Response>> + Send,
    {
        Self(f)
    }
}

impl<F> std::fmt::Debug for FetchFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchFn").finish_non_exhaustive()
    }
}

impl<F, Fut> Fetch for FetchFn<F>
where
    F: Fn(Request<Bytes>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response>> + Send,
{
    fn fetch(&self, request: Request<Bytes>) -> impl Future<Output = Result<Response>> + Send {
        (self.0)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Method};

    fn request() -> Request<Bytes> {
        let url = url::Url::parse("https://api.example.com/ping").expect("valid URL");
        Request::builder(Method::Get, url).build()
    }

    #[tokio::test]
    async fn fetch_fn_forwards_request() {
        let fetch = FetchFn::new(|request: Request<Bytes>| async move {
            let status = if request.url().path() == "/ping" { 200 } else { 404 };
            Ok::<_, Error>(Response::new(status, http::HeaderMap::new(), "pong"))
        });

        let response = fetch.fetch(request()).await.expect("response");
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn fetch_fn_reports_failure() {
        let fetch = FetchFn::new(|_| async { Err::<Response, _>(Error::connection("offline")) });

        let err = fetch.fetch(request()).await.expect_err("offline");
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn fetch_through_references() {
        let fetch = Arc::new(FetchFn::new(|_| async {
            Ok::<_, Error>(Response::new(204, http::HeaderMap::new(), crate::Body::empty()))
        }));

        let by_ref = &fetch;
        assert_eq!(by_ref.fetch(request()).await.expect("response").status(), 204);
        assert_eq!(fetch.fetch(request()).await.expect("response").status(), 204);
    }
}
