//! Common test utilities for store integration tests.
//!
//! This module provides shared helper functions and re-exports commonly
//! used types for testing the remote config store against a mock config
//! server. All integration tests should use these utilities to ensure
//! consistency.
//!
//! # Invariants
//! - `store_for` builds stores against the fixed `testapp`/`production`
//!   path served under [`TEST_PATH`]
//! - Documents built here follow the config server response shape

// Re-export commonly used types for test convenience
// These are used via `use common::*;` in test files
#[allow(unused_imports)]
pub use wiremock::matchers::{header, method, path};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use std::sync::Arc;

use cloudconfig_client::ClientConfig;
use cloudconfig_store::{Environment, MapEnv, RemoteConfigStore, StoreSettings};

/// Service name every test store requests.
#[allow(dead_code)]
pub const TEST_SERVICE: &str = "testapp";

/// Profile every test store requests.
#[allow(dead_code)]
pub const TEST_PROFILE: &str = "production";

/// Request path the mock server should answer for the default store.
#[allow(dead_code)]
pub const TEST_PATH: &str = "/testapp/production";

/// Build a store for the given mock server URI with a fixed in-memory
/// environment.
#[allow(dead_code)]
pub fn store_for(uri: &str, env: MapEnv) -> RemoteConfigStore {
    store_with_env(uri, Arc::new(env))
}

/// Build a store for the given mock server URI with any environment.
#[allow(dead_code)]
pub fn store_with_env(uri: &str, env: Arc<dyn Environment>) -> RemoteConfigStore {
    let settings = StoreSettings::new(TEST_SERVICE, TEST_PROFILE, ClientConfig::new(uri));
    RemoteConfigStore::with_environment(settings, env).unwrap()
}

/// Build a config server document from ordered (name, source) pairs.
#[allow(dead_code)]
pub fn config_document(sources: &[(&str, serde_json::Value)]) -> serde_json::Value {
    let property_sources: Vec<serde_json::Value> = sources
        .iter()
        .map(|(name, source)| serde_json::json!({"name": name, "source": source}))
        .collect();
    serde_json::json!({
        "name": TEST_SERVICE,
        "profiles": [TEST_PROFILE],
        "label": null,
        "version": "5e3a64ad60b4b8358a651b6b1b138eee13a24f72",
        "propertySources": property_sources,
    })
}

/// Mount a 200 response serving `document` on the default service path.
#[allow(dead_code)]
pub async fn mount_document(server: &MockServer, document: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(TEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(document))
        .mount(server)
        .await;
}
