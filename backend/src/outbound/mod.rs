//! Outbound adapters implementing domain ports.
//!
//! - **memory**: in-process movie catalogue
//!
//! Adapters translate between domain types and their storage
//! representation. They contain no business logic.

pub mod memory;
