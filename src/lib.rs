//! Hookrelay: webhook event forwarding
//!
//! A library for forwarding already-captured webhook events (body + headers)
//! to configured local HTTP endpoints, with routing predicates for deciding
//! which endpoint should receive a given event.

pub mod endpoint;
pub mod transport;
