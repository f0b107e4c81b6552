//! Demo Frontend Module
//!
//! Small web UI that exercises an external sentiment service: single-text
//! scoring, batch accuracy over a labeled dataset, and request metrics.

pub mod handlers;
pub mod page;
pub mod routes;
pub mod types;

pub use handlers::DemoState;
pub use routes::create_demo_router;
pub use types::*;
