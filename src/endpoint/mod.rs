//! Event forwarding to configured local endpoints.
//!
//! This module provides:
//! - The forwarding client ([`EndpointClient`]) with its routing predicates
//!   and delivery operations
//! - The shared dependency bundle ([`EndpointConfig`]) and the error record
//!   emitted on delivery failure ([`ErrorElement`])
//! - The response-handling capability ([`ResponseHandler`])
//! - Normalization of raw header/event inputs ([`normalize_headers`],
//!   [`normalize_events`])

mod client;
mod config;
mod error;
mod handler;
mod normalize;

#[cfg(test)]
mod config_tests;

pub use client::{EndpointClient, EventContext};
pub use config::{EndpointConfig, ErrorElement};
pub use error::{FailedToPostError, ForwardError, NormalizeError};
pub use handler::ResponseHandler;
pub use normalize::{normalize_events, normalize_headers};
