//! The request pipeline: one transport call, at most one body decode, one
//! classified outcome.
//!
//! ```text
//! target + init ──invoke──▶ Response ──classify──▶ Ok(ProcessedResponse)
//!        │                                    ├──▶ Err(Http { resp, json, text })
//!        └──▶ Err(Network)                    └──▶ Err(Post { resp, error })
//! ```

use std::future::Future;

use serde_json::Value;
use tracing::{Instrument, debug, field, info_span, warn};

use crate::{
    DecodeError, Fetch, Method, Outcome, ProcessedResponse, RequestError, RequestInit, Response,
    Target, content_type, has_content, is_json, is_text, read_json, read_text,
};

/// Perform one request and classify its outcome. Never panics, never retries.
///
/// `init` overrides parts of `target`; pass `None` to send the target as is.
///
/// # Example
///
/// ```ignore
/// use safetch::{HyperFetch, RequestError};
///
/// let client = HyperFetch::new();
/// match safetch::request(&client, "https://api.example.com/users/1", None).await {
///     Ok(processed) => println!("{:?}", processed.json),
///     Err(RequestError::Network) => eprintln!("offline?"),
///     Err(RequestError::Http { resp, text, .. }) => eprintln!("{}: {text:?}", resp.status()),
///     Err(RequestError::Post { error, .. }) => eprintln!("bad body: {error}"),
/// }
/// ```
pub fn request<F>(
    fetch: &F,
    target: impl Into<Target>,
    init: impl Into<Option<RequestInit>>,
) -> impl Future<Output = Outcome> + Send
where
    F: Fetch + ?Sized,
{
    let target = target.into();
    let init = init.into().unwrap_or_default();
    let span = info_span!("http_request", method = field::Empty, url = field::Empty);
    run(fetch, target, init).instrument(span)
}

/// Like [`request`], but always sends a `GET`.
///
/// The method is forced: a method set in `init`, or on a [`Request`](crate::Request)
/// target, is overridden.
pub fn get<F>(
    fetch: &F,
    target: impl Into<Target>,
    init: impl Into<Option<RequestInit>>,
) -> impl Future<Output = Outcome> + Send
where
    F: Fetch + ?Sized,
{
    let init = init.into().unwrap_or_default().method(Method::Get);
    request(fetch, target, init)
}

async fn run<F>(fetch: &F, target: Target, init: RequestInit) -> Outcome
where
    F: Fetch + ?Sized,
{
    let resp = invoke(fetch, target, init).await?;
    classify(resp).await
}

/// Send the request once through the transport.
///
/// Every failure, including a target that cannot be turned into a request,
/// becomes [`RequestError::Network`]. The cause is logged, not returned.
pub async fn invoke<F>(
    fetch: &F,
    target: Target,
    init: RequestInit,
) -> Result<Response, RequestError>
where
    F: Fetch + ?Sized,
{
    let request = target.into_request(init).map_err(|err| {
        warn!(error = %err, "request could not be built");
        RequestError::Network
    })?;

    let span = tracing::Span::current();
    span.record("method", request.method().as_str());
    span.record("url", request.url().as_str());

    fetch.fetch(request).await.map_err(|err| {
        warn!(error = %err, "transport failed");
        RequestError::Network
    })
}

/// Decode the body of a response the content type asks for, then fold decode
/// and status into an outcome.
///
/// The body is decoded only when `content-length` is non-zero, and only for
/// JSON and text content types. A failing status wins over a decode error.
pub async fn classify(mut resp: Response) -> Outcome {
    let (json, text, decode_error) = match decode(&mut resp).await {
        Ok(Content::Json(value)) => (Some(value), None, None),
        Ok(Content::Text(value)) => (None, Some(value), None),
        Ok(Content::None) => (None, None, None),
        Err(error) => (None, None, Some(error)),
    };

    let status = resp.status();
    if !resp.ok() {
        if let Some(error) = &decode_error {
            debug!(status, %error, "body decode failed on an error response");
        }
        debug!(status, "classified as http error");
        return Err(RequestError::Http { resp, json, text });
    }

    if let Some(error) = decode_error {
        debug!(status, %error, "classified as post-processing error");
        return Err(RequestError::Post { resp, error });
    }

    debug!(status, "request succeeded");
    Ok(ProcessedResponse { resp, json, text })
}

/// Method-call sugar for [`request`] and [`get`] on any [`Fetch`].
///
/// ```ignore
/// use safetch::{FetchExt, HyperFetch};
///
/// let client = HyperFetch::new();
/// let outcome = client.get("https://api.example.com/health", None).await;
/// ```
pub trait FetchExt: Fetch {
    /// See [`request`].
    fn request(
        &self,
        target: impl Into<Target>,
        init: impl Into<Option<RequestInit>>,
    ) -> impl Future<Output = Outcome> + Send {
        request(self, target, init)
    }

    /// See [`get`].
    fn get(
        &self,
        target: impl Into<Target>,
        init: impl Into<Option<RequestInit>>,
    ) -> impl Future<Output = Outcome> + Send {
        get(self, target, init)
    }
}

impl<T: Fetch + ?Sized> FetchExt for T {}

enum Content {
    Json(Value),
    Text(String),
    None,
}

async fn decode(resp: &mut Response) -> Result<Content, DecodeError> {
    if !has_content(resp) {
        return Ok(Content::None);
    }

    let content_type = content_type(resp);
    if is_json(&content_type) {
        debug!(%content_type, "decoding JSON body");
        read_json(resp).await.map(Content::Json)
    } else if is_text(&content_type) {
        debug!(%content_type, "decoding text body");
        read_text(resp).await.map(Content::Text)
    } else {
        debug!(%content_type, "leaving body undecoded");
        Ok(Content::None)
    }
}
