//! Providers Module - External Data Sources
//!
//! Clients for services this crate talks to over HTTP.

pub mod sentiment_client;

pub use sentiment_client::*;
