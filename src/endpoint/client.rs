//! The forwarding engine: endpoint identity, routing predicates, delivery.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use http::header::{HeaderName, HeaderValue};
use tracing::debug;

use crate::transport::{HttpClient, HttpRequest, ReqwestClient};

use super::config::{EndpointConfig, ErrorElement};
use super::error::{FailedToPostError, ForwardError, NormalizeError};
use super::normalize::{normalize_events, normalize_headers};

/// A captured inbound event awaiting forwarding.
///
/// Holds the opaque payload bytes plus the metadata needed to reconstruct
/// the original request at the destination. Immutable once built.
#[derive(Debug, Clone)]
pub struct EventContext {
    request_body: Vec<u8>,
    request_headers: http::HeaderMap,
}

impl EventContext {
    /// Creates an event context from the captured body and headers.
    #[must_use]
    pub const fn new(request_body: Vec<u8>, request_headers: http::HeaderMap) -> Self {
        Self {
            request_body,
            request_headers,
        }
    }

    /// Returns the captured request body.
    #[must_use]
    pub fn request_body(&self) -> &[u8] {
        &self.request_body
    }

    /// Returns the captured request headers.
    #[must_use]
    pub const fn request_headers(&self) -> &http::HeaderMap {
        &self.request_headers
    }
}

/// The client used to POST webhook events to a local endpoint.
///
/// A client is a reusable request template: its URL, sanitized header map,
/// event subscriptions, and mode flag are fixed at construction, so clones
/// can be posted from any number of concurrent tasks. Each `post`/`post_v2`
/// call is an independent transaction that blocks its task for at most the
/// transport timeout.
///
/// # Routing
///
/// Callers pick the target client(s) for an event with
/// [`supports_event_type`](Self::supports_event_type) and
/// [`supports_context`](Self::supports_context) before delivering. The
/// `connect` flag partitions clients into two disjoint routing universes:
/// a client only matches events whose mode equals its own.
///
/// # Example
///
/// ```
/// use hookrelay::endpoint::EndpointClient;
///
/// let client = EndpointClient::new(
///     "http://localhost:3000/webhook",
///     &["Authorization: Bearer secret"],
///     false,
///     &["payment.created", "payment.updated"],
///     false,
/// )?;
///
/// assert!(client.supports_event_type(false, "payment.created"));
/// assert!(!client.supports_event_type(false, "refund.created"));
/// # Ok::<(), hookrelay::endpoint::NormalizeError>(())
/// ```
#[derive(Debug)]
pub struct EndpointClient<T = ReqwestClient> {
    url: String,
    headers: HashMap<String, String>,
    connect: bool,
    events: HashSet<String>,
    is_event_destination: bool,
    cfg: Arc<EndpointConfig<T>>,
}

impl EndpointClient<ReqwestClient> {
    /// Creates a client with a fully-defaulted configuration bundle:
    /// the default transport (30-second timeout, no redirect following),
    /// a no-op response handler, and no output channel.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError`] if a header entry fails validation.
    pub fn new<H: AsRef<str>, E: AsRef<str>>(
        url: impl Into<String>,
        headers: &[H],
        connect: bool,
        events: &[E],
        is_event_destination: bool,
    ) -> Result<Self, NormalizeError> {
        Self::with_config(
            url,
            headers,
            connect,
            events,
            is_event_destination,
            Arc::new(EndpointConfig::default()),
        )
    }
}

impl<T: HttpClient> EndpointClient<T> {
    /// Creates a client that shares the given configuration bundle.
    ///
    /// The header map and event set are normalized once here; the client is
    /// immutable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError`] if a header entry fails validation.
    pub fn with_config<H: AsRef<str>, E: AsRef<str>>(
        url: impl Into<String>,
        headers: &[H],
        connect: bool,
        events: &[E],
        is_event_destination: bool,
        cfg: Arc<EndpointConfig<T>>,
    ) -> Result<Self, NormalizeError> {
        Ok(Self {
            url: url.into(),
            headers: normalize_headers(headers)?,
            connect,
            events: normalize_events(events),
            is_event_destination,
            cfg,
        })
    }

    /// Returns the URL the client forwards events to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns true if the client routes connect-mode events.
    #[must_use]
    pub const fn connect_mode(&self) -> bool {
        self.connect
    }

    /// Returns true if the client targets a one-shot event destination.
    #[must_use]
    pub const fn is_event_destination(&self) -> bool {
        self.is_event_destination
    }

    /// Returns true if the client should receive events of the given type.
    ///
    /// The event's mode must equal the client's, and the client's
    /// subscriptions must contain either the type itself or the `"*"`
    /// wildcard.
    #[must_use]
    pub fn supports_event_type(&self, connect: bool, event_type: &str) -> bool {
        if connect != self.connect {
            return false;
        }

        self.events.contains("*") || self.events.contains(event_type)
    }

    /// Returns true if the client supports the given account context.
    ///
    /// Connect-mode destinations require a context tag; direct-mode
    /// destinations must not carry one.
    #[must_use]
    pub fn supports_context(&self, context: &str) -> bool {
        if self.connect {
            return !context.is_empty();
        }

        context.is_empty()
    }

    /// Forwards an event to the local endpoint through the configured
    /// transport.
    ///
    /// On success the response handler is invoked exactly once with the
    /// event, the target URL, and the buffered response; status codes are
    /// not inspected here.
    ///
    /// # Errors
    ///
    /// Request-construction failures (malformed URL, invalid header token)
    /// are returned directly. Transport failures are returned after one
    /// [`ErrorElement`] has been emitted to the output channel, when one is
    /// configured.
    pub async fn post(&self, evt_ctx: &EventContext) -> Result<(), ForwardError> {
        debug!(url = %self.url, "forwarding event to local endpoint");

        self.deliver(&self.cfg.transport, evt_ctx).await
    }

    /// Forwards an event to a local event destination.
    ///
    /// Same contract as [`post`](Self::post), but delivery goes through the
    /// process-wide shared transport instead of the configured one, and no
    /// debug log is emitted. Intended for one-shot delivery outside the
    /// main session.
    ///
    /// # Errors
    ///
    /// As for [`post`](Self::post).
    pub async fn post_v2(&self, evt_ctx: &EventContext) -> Result<(), ForwardError> {
        self.deliver(ReqwestClient::shared(), evt_ctx).await
    }

    /// Single delivery path shared by both send operations; only the
    /// transport differs.
    async fn deliver<C: HttpClient>(
        &self,
        transport: &C,
        evt_ctx: &EventContext,
    ) -> Result<(), ForwardError> {
        let request = self.build_request(evt_ctx)?;

        let response = match transport.request(request).await {
            Ok(response) => response,
            Err(e) => {
                let failure = FailedToPostError::new(e);
                if let Some(out_tx) = &self.cfg.out_tx {
                    // Waits for channel acceptance, so a slow consumer
                    // back-pressures failing deliveries. A dropped receiver
                    // just means nobody is watching.
                    let _ = out_tx
                        .send(ErrorElement {
                            error: failure.clone(),
                        })
                        .await;
                }
                return Err(failure.into());
            }
        };

        self.cfg.response_handler.handle(evt_ctx, &self.url, response);

        Ok(())
    }

    /// Reconstructs the outgoing POST from the captured event and the
    /// client's own headers.
    fn build_request(&self, evt_ctx: &EventContext) -> Result<HttpRequest, ForwardError> {
        let url = url::Url::parse(&self.url).map_err(|source| ForwardError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;

        let mut request = HttpRequest::post(url).with_body(evt_ctx.request_body().to_vec());

        for (name, value) in evt_ctx.request_headers() {
            request.headers.append(name, value.clone());
        }

        // Client headers win on key collision. A key named "host" becomes
        // the request's Host instead of a header-map entry.
        for (key, value) in &self.headers {
            if key.eq_ignore_ascii_case("host") {
                request.host = Some(parse_value(key, value)?);
            } else {
                let name = HeaderName::from_bytes(key.as_bytes()).map_err(|source| {
                    ForwardError::InvalidHeaderName {
                        name: key.clone(),
                        source,
                    }
                })?;
                request.headers.insert(name, parse_value(key, value)?);
            }
        }

        Ok(request)
    }
}

impl<T> Clone for EndpointClient<T> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            headers: self.headers.clone(),
            connect: self.connect,
            events: self.events.clone(),
            is_event_destination: self.is_event_destination,
            cfg: Arc::clone(&self.cfg),
        }
    }
}

fn parse_value(key: &str, value: &str) -> Result<HeaderValue, ForwardError> {
    HeaderValue::from_str(value).map_err(|source| ForwardError::InvalidHeaderValue {
        name: key.to_string(),
        source,
    })
}
