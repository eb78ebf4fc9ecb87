//! Inbound adapters that translate external requests into domain calls
//! while keeping framework details at the edge.
//!
//! HTTP is the only transport; it lives under [`http`].

pub mod http;
