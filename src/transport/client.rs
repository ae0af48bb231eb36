//! Production HTTP client implementation using reqwest.

use std::sync::OnceLock;
use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Default request timeout for forwarded events.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` that implements the
/// [`HttpClient`] trait. The default configuration matches the forwarding
/// contract: requests time out after [`DEFAULT_TIMEOUT`] and redirects are
/// never followed automatically, so the first response received is the one
/// handed back to the caller (a 3xx is returned, not chased).
///
/// # Example
///
/// ```no_run
/// use hookrelay::transport::{ReqwestClient, HttpClient, HttpRequest};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("http://localhost:3000/webhook")?;
/// let request = HttpRequest::post(url).with_body(b"hello".to_vec());
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new HTTP client with the forwarding defaults:
    /// a 30-second timeout and no automatic redirect following.
    #[must_use]
    pub fn new() -> Self {
        let inner = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("TLS backend initializes with default configuration");

        Self { inner }
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (timeouts, TLS, etc.).
    /// Note that reqwest follows redirects by default; callers wanting the
    /// forwarding behavior must configure `redirect::Policy::none`.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    /// Returns the process-wide shared client.
    ///
    /// Lazily initialized on first use with the same defaults as
    /// [`ReqwestClient::new`]. This is the transport used for one-shot
    /// event-destination delivery, where no per-session client exists.
    #[must_use]
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<ReqwestClient> = OnceLock::new();
        SHARED.get_or_init(Self::new)
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        // The Host override lives outside the header map; it reaches the
        // wire as the Host header.
        if let Some(host) = req.host {
            builder = builder.header(http::header::HOST, host);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else if e.is_builder() {
                HttpError::InvalidUrl(e.to_string())
            } else {
                HttpError::Connection(Box::new(e))
            }
        })?;

        // Buffering the body consumes the connection's response stream, so
        // every exit path below leaves no body resources held.
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Connection(Box::new(e)))?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}
