//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the config server client. All integration tests should
//! use these utilities to ensure consistency.
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

// Re-export commonly used types for test convenience
// These are used via `use common::*;` in test files
#[allow(unused_imports)]
pub use wiremock::matchers::{header, method, path};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use cloudconfig_client::{ClientConfig, ConfigClient};

/// Build a client for the given mock server URI with default settings.
#[allow(dead_code)]
pub fn client_for(uri: &str) -> ConfigClient {
    ConfigClient::new(ClientConfig::new(uri)).unwrap()
}

/// A realistic config server document with one property source.
#[allow(dead_code)]
pub fn sample_document() -> serde_json::Value {
    serde_json::json!({
        "name": "accountservice",
        "profiles": ["production"],
        "label": null,
        "version": "5e3a64ad60b4b8358a651b6b1b138eee13a24f72",
        "propertySources": [
            {
                "name": "https://github.com/example/config-repo/accountservice-production.yml",
                "source": {
                    "server_port": "8080",
                    "db_url": "postgres://db:5432/accounts"
                }
            }
        ]
    })
}
