//! HTTP client for a Spring-style config server.
//!
//! This crate provides the transport used to fetch the configuration
//! document for a `{service}/{profile}[/{label}]` path from a remote config
//! server, with HTTP Basic authentication and bounded retries for transient
//! failures. Responses are decoded to `serde_json::Value` and handed back
//! untouched; interpreting the property sources inside the document is the
//! store crate's job.

mod client;
mod config;
mod error;
mod request;
mod url_encoding;

pub use client::ConfigClient;
pub use config::{ClientConfig, DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};
pub use error::{ClientError, Result};
