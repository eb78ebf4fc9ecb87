//! HTTP inbound adapter: pipeline stages, REST endpoints, and fault mapping.

pub mod correlation;
pub mod error;
pub mod exception;
pub mod health;
pub mod movies;
pub mod pipeline;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
