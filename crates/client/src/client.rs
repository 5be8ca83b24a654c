//! Config server client.
//!
//! This module is responsible for:
//! - Validating required settings and normalizing the base URL
//! - Configuring the underlying HTTP client (timeouts, redirects, TLS)
//! - Fetching the configuration document for a service/profile/label path
//!
//! # What this module does NOT handle:
//! - Interpreting the fetched document (property-source merging lives in
//!   the store crate)
//! - Retry pacing for transient failures (handled in `request.rs`)
//!
//! # Invariants
//! - The base URL is always normalized to have no trailing slashes
//! - Path segments built from caller input are always percent-encoded
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a
//!   warning

use reqwest::Url;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::config::{ClientConfig, DEFAULT_MAX_REDIRECTS};
use crate::error::{ClientError, Result};
use crate::request::send_request_with_retry;
use crate::url_encoding::encode_path_segment;

/// Client for a Spring-style config server.
///
/// Fetches `{base_url}/{service}/{profile}[/{label}]` with optional HTTP
/// Basic authentication and returns the decoded JSON document.
///
/// # Example
///
/// ```rust,ignore
/// use cloudconfig_client::{ClientConfig, ConfigClient};
///
/// let client = ConfigClient::new(
///     ClientConfig::new("http://localhost:8888").with_basic_auth("admin", "secret"),
/// )?;
/// let document = client.get_config("accountservice", "production", None).await?;
/// ```
#[derive(Debug)]
pub struct ConfigClient {
    http: reqwest::Client,
    base_url: String,
    username: Option<String>,
    password: Option<SecretString>,
    max_retries: usize,
}

impl ConfigClient {
    /// Build a client from the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the base URL is empty or not
    /// an absolute URL. Returns `ClientError::HttpError` if the HTTP client
    /// fails to build.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Self::normalize_base_url(config.base_url);
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("base_url is required".to_string()));
        }
        Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if config.skip_verify {
            let is_https = base_url.starts_with("https://");
            if is_https {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                // skip_verify only affects TLS certificate verification.
                // It has no effect on HTTP connections since there is no TLS layer.
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(Self {
            http,
            base_url,
            username: config.username,
            password: config.password,
            max_retries: config.max_retries,
        })
    }

    /// The normalized base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// This prevents double slashes when concatenating with request paths.
    ///
    /// # Examples
    ///
    /// - `"http://localhost:8888/"` -> `"http://localhost:8888"`
    /// - `"http://localhost:8888"` -> `"http://localhost:8888"`
    /// - `"http://example.com:8888//"` -> `"http://example.com:8888"`
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// URL of the configuration document for `service`/`profile`.
    fn config_url(&self, service: &str, profile: &str, label: Option<&str>) -> String {
        let mut url = format!(
            "{}/{}/{}",
            self.base_url,
            encode_path_segment(service),
            encode_path_segment(profile)
        );
        if let Some(label) = label {
            url.push('/');
            url.push_str(&encode_path_segment(label));
        }
        url
    }

    /// Fetch the configuration document for a service and profile.
    ///
    /// The document is returned as decoded JSON without further
    /// interpretation; the caller decides what to make of the property
    /// sources inside it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ApiError`] for a non-success response (the
    /// variant carries the HTTP status, so a 404 stays recognizable),
    /// [`ClientError::MaxRetriesExceeded`] when transient statuses persist
    /// past the retry budget, and `ClientError::HttpError` for connection
    /// or decode failures.
    pub async fn get_config(
        &self,
        service: &str,
        profile: &str,
        label: Option<&str>,
    ) -> Result<serde_json::Value> {
        let url = self.config_url(service, profile, label);
        debug!(%url, "Fetching configuration document");

        let mut request = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-cache");
        if let Some(username) = &self.username {
            request = request.basic_auth(
                username,
                self.password.as_ref().map(|p| p.expose_secret()),
            );
        }

        let response = send_request_with_retry(request, self.max_retries).await?;
        Ok(response.json().await?)
    }
}
