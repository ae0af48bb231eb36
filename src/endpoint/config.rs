//! Configuration bundle shared by endpoint clients.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::transport::{HttpClient, HttpResponse, ReqwestClient};

use super::error::FailedToPostError;
use super::handler::ResponseHandler;
use super::EventContext;

/// An error record emitted to the output channel when delivery fails.
///
/// Consumed outside this crate, typically to render or log delivery status.
#[derive(Debug, Clone)]
pub struct ErrorElement {
    /// The wrapped transport failure
    pub error: FailedToPostError,
}

/// Dependency bundle for [`EndpointClient`](super::EndpointClient).
///
/// Holds the HTTP transport, the response handler, and the optional output
/// channel for failure records. A bundle is built once, wrapped in an `Arc`,
/// and shared read-only by any number of clients and tasks.
///
/// # Defaults
///
/// [`EndpointConfig::new`] fills everything except the transport with
/// defaults: a no-op response handler and no output channel. Delivery
/// failures without a channel are still returned to the caller, just not
/// reported anywhere else. Logging is ambient `tracing`; with no subscriber
/// installed it is discarded.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use hookrelay::endpoint::{EndpointConfig, ErrorElement};
/// use hookrelay::transport::ReqwestClient;
///
/// let (out_tx, _out_rx) = tokio::sync::mpsc::channel::<ErrorElement>(64);
/// let cfg = Arc::new(
///     EndpointConfig::new(ReqwestClient::new()).with_output_channel(out_tx),
/// );
/// # let _ = cfg;
/// ```
pub struct EndpointConfig<T = ReqwestClient> {
    pub(crate) transport: T,
    pub(crate) response_handler: Arc<dyn ResponseHandler>,
    pub(crate) out_tx: Option<mpsc::Sender<ErrorElement>>,
}

impl<T: HttpClient> EndpointConfig<T> {
    /// Creates a bundle around the given transport, with a no-op response
    /// handler and no output channel.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            response_handler: Arc::new(|_: &EventContext, _: &str, _: HttpResponse| {}),
            out_tx: None,
        }
    }

    /// Sets the response handler invoked on every successful delivery.
    #[must_use]
    pub fn with_response_handler(mut self, handler: Arc<dyn ResponseHandler>) -> Self {
        self.response_handler = handler;
        self
    }

    /// Sets the channel that receives an [`ErrorElement`] per transport
    /// failure.
    ///
    /// The channel's capacity is the caller's backpressure choice: a failing
    /// delivery waits until its record is accepted, so a full channel with a
    /// slow consumer stalls failing posts.
    #[must_use]
    pub fn with_output_channel(mut self, out_tx: mpsc::Sender<ErrorElement>) -> Self {
        self.out_tx = Some(out_tx);
        self
    }

    /// Returns the configured transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }
}

impl Default for EndpointConfig<ReqwestClient> {
    fn default() -> Self {
        Self::new(ReqwestClient::new())
    }
}

impl<T: fmt::Debug> fmt::Debug for EndpointConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("transport", &self.transport)
            .field("out_tx", &self.out_tx)
            .finish_non_exhaustive()
    }
}
