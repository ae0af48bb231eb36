//! HTTP transport layer for forwarding requests to local endpoints.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])

mod client;
mod error;
mod http;

#[cfg(test)]
mod client_tests;

pub use client::{DEFAULT_TIMEOUT, ReqwestClient};
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
