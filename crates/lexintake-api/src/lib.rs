//! HTTP transport layer for the lexintake assistant.
//!
//! One chat endpoint, one narration endpoint, and a health check, behind
//! CORS and request tracing. The transport validates input and maps errors;
//! all conversation logic lives in `lexintake-dialog`.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
