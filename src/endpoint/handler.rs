//! Response handler capability.

use crate::transport::HttpResponse;

use super::EventContext;

/// Handles the response from a successful delivery.
///
/// Invoked exactly once per successful `post`/`post_v2` call with the event
/// that was forwarded, the target URL it was forwarded to, and the
/// fully-buffered response. The client does not observe the handler's
/// outcome and does not inspect status codes itself; what to do with a
/// non-2xx response is entirely the handler's policy.
pub trait ResponseHandler: Send + Sync {
    /// Processes the response from the endpoint.
    fn handle(&self, evt_ctx: &EventContext, forward_url: &str, response: HttpResponse);
}

/// Adapter allowing ordinary closures to be used as response handlers.
impl<F> ResponseHandler for F
where
    F: Fn(&EventContext, &str, HttpResponse) + Send + Sync,
{
    fn handle(&self, evt_ctx: &EventContext, forward_url: &str, response: HttpResponse) {
        self(evt_ctx, forward_url, response);
    }
}
