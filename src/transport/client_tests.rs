//! Tests for `ReqwestClient`.

use super::*;
use ::http;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Spawns a one-shot stub server on a loopback port.
///
/// Accepts a single connection, reads the full request (headers plus a
/// Content-Length body if present), writes `response` verbatim, and returns
/// the captured request text through the join handle.
async fn spawn_stub(
    response: &'static str,
) -> (std::net::SocketAddr, tokio::task::JoinHandle<String>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        request
    });

    (addr, handle)
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before body was complete");
        buf.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8_lossy(&buf).to_string()
}

mod reqwest_client {
    use super::*;

    #[test]
    fn new_creates_client() {
        let client = ReqwestClient::new();
        let _ = format!("{client:?}");
    }

    #[test]
    fn default_creates_same_as_new() {
        let client1 = ReqwestClient::new();
        let client2 = ReqwestClient::default();

        let _ = format!("{client1:?}");
        let _ = format!("{client2:?}");
    }

    #[test]
    fn from_client_accepts_custom_client() {
        let custom = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap();
        let client = ReqwestClient::from_client(custom);

        let _ = format!("{client:?}");
    }

    #[test]
    fn shared_returns_same_instance() {
        let a = std::ptr::from_ref(ReqwestClient::shared());
        let b = std::ptr::from_ref(ReqwestClient::shared());

        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn request_to_unreachable_host_returns_connection_error() {
        let client = ReqwestClient::new();
        let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();
        let req = HttpRequest::post(url);

        let result = client.request(req).await;

        assert!(matches!(
            result,
            Err(HttpError::Connection(_) | HttpError::Timeout)
        ));
    }

    #[tokio::test]
    async fn request_sends_body_and_headers() {
        let (addr, handle) =
            spawn_stub("HTTP/1.1 200 OK\r\ncontent-length: 2\r\n\r\nok").await;

        let url = url::Url::parse(&format!("http://{addr}/hook")).unwrap();
        let req = HttpRequest::post(url)
            .with_header(
                http::HeaderName::from_static("x-event-id"),
                http::HeaderValue::from_static("evt_123"),
            )
            .with_body(b"{\"id\":\"evt_123\"}".to_vec());

        let client = ReqwestClient::new();
        let response = client.request(req).await.unwrap();

        assert_eq!(response.status, http::StatusCode::OK);
        assert_eq!(response.body_text(), Some("ok"));

        let captured = handle.await.unwrap();
        assert!(captured.starts_with("POST /hook HTTP/1.1\r\n"));
        assert!(captured.to_lowercase().contains("x-event-id: evt_123"));
        assert!(captured.ends_with("{\"id\":\"evt_123\"}"));
    }

    #[tokio::test]
    async fn host_override_reaches_the_wire() {
        let (addr, handle) = spawn_stub("HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n").await;

        let url = url::Url::parse(&format!("http://{addr}/")).unwrap();
        let req = HttpRequest::post(url).with_host(http::HeaderValue::from_static("example.com"));

        let client = ReqwestClient::new();
        client.request(req).await.unwrap();

        let captured = handle.await.unwrap().to_lowercase();
        assert!(captured.contains("host: example.com"));
        assert!(!captured.contains(&format!("host: {addr}")));
    }

    #[tokio::test]
    async fn redirects_are_returned_not_followed() {
        let (addr, _handle) = spawn_stub(
            "HTTP/1.1 302 Found\r\nlocation: http://invalid.invalid/\r\ncontent-length: 0\r\n\r\n",
        )
        .await;

        let url = url::Url::parse(&format!("http://{addr}/")).unwrap();
        let client = ReqwestClient::new();
        let response = client.request(HttpRequest::post(url)).await.unwrap();

        // First response is final: the 302 comes back instead of being chased.
        assert_eq!(response.status, http::StatusCode::FOUND);
    }
}
