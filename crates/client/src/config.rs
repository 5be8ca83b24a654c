//! Transport settings for the config server client.
//!
//! Responsibilities:
//! - Define `ClientConfig` as a plain struct with explicit fields.
//! - Centralize the default timeout, retry, and redirect constants.
//!
//! Does NOT handle:
//! - Base URL validation (done once in `ConfigClient::new`).
//! - Request execution (see `client.rs` and `request.rs`).

use std::time::Duration;

use secrecy::SecretString;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of retries for retryable responses.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Connection settings for the config server.
///
/// Construct with [`ClientConfig::new`], adjust the fields you care about,
/// and hand it to [`ConfigClient::new`](crate::ConfigClient::new), which
/// validates the base URL and builds the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the config server, e.g. `https://config.internal:8888`.
    /// Trailing slashes are normalized away.
    pub base_url: String,
    /// Username for HTTP Basic auth. `None` sends unauthenticated requests.
    pub username: Option<String>,
    /// Password for HTTP Basic auth. Wrapped so `Debug` output never
    /// contains it.
    pub password: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Maximum number of retries for retryable statuses. Zero disables
    /// retrying.
    pub max_retries: usize,
    /// Accept invalid TLS certificates. Only meaningful for `https` URLs
    /// and only intended for development servers.
    pub skip_verify: bool,
}

impl ClientConfig {
    /// Settings for the given base URL with defaults everywhere else.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: None,
            password: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            skip_verify: false,
        }
    }

    /// Attach HTTP Basic credentials.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password: String = password.into();
        self.username = Some(username.into());
        self.password = Some(SecretString::new(password.into()));
        self
    }
}
