//! Tests for the configuration bundle.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::transport::{HttpResponse, ReqwestClient};

use super::*;

#[test]
fn new_defaults_to_no_output_channel() {
    let cfg = EndpointConfig::new(ReqwestClient::new());

    assert!(cfg.out_tx.is_none());
}

#[test]
fn default_is_equivalent_to_new_with_default_transport() {
    let cfg = EndpointConfig::default();

    assert!(cfg.out_tx.is_none());
    let _ = cfg.transport();
}

#[test]
fn with_output_channel_sets_channel() {
    let (out_tx, _out_rx) = tokio::sync::mpsc::channel::<ErrorElement>(8);
    let cfg = EndpointConfig::new(ReqwestClient::new()).with_output_channel(out_tx);

    assert!(cfg.out_tx.is_some());
}

#[test]
fn default_response_handler_is_a_no_op() {
    let cfg = EndpointConfig::new(ReqwestClient::new());
    let evt_ctx = EventContext::new(vec![], http::HeaderMap::new());
    let response = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![]);

    // Nothing observable, just must not panic.
    cfg.response_handler.handle(&evt_ctx, "http://localhost/", response);
}

#[test]
fn with_response_handler_replaces_the_default() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    let cfg = EndpointConfig::new(ReqwestClient::new()).with_response_handler(Arc::new(
        move |_: &EventContext, _: &str, _: HttpResponse| {
            seen.fetch_add(1, Ordering::SeqCst);
        },
    ));

    let evt_ctx = EventContext::new(vec![], http::HeaderMap::new());
    let response = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![]);
    cfg.response_handler.handle(&evt_ctx, "http://localhost/", response);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn debug_format_is_readable() {
    let cfg = EndpointConfig::new(ReqwestClient::new());

    assert!(format!("{cfg:?}").contains("EndpointConfig"));
}
