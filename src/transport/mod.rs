//! HTTP transport layer.

pub mod http;

pub use http::{HttpReply, HttpTransport, TransportError, TransportOptions};
