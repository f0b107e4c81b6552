//! Sentiment Service API Module
//! REST API exposing the quantized sentiment model

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use routes::create_router;
pub use types::*;
