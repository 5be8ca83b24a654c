//! Error types for the config store.

use cloudconfig_client::ClientError;
use thiserror::Error;

/// Errors surfaced by [`RemoteConfigStore::sync`](crate::RemoteConfigStore::sync).
///
/// Read operations never fail; a failed sync leaves the previously
/// published snapshot untouched.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The server has no configuration for this service and profile.
    #[error("configuration not found on server")]
    NotFound,

    /// The response decoded as JSON but did not contain the expected
    /// property-source structure.
    #[error("invalid config server payload: {0}")]
    InvalidPayload(String),

    /// The document could not be fetched.
    #[error("failed to fetch configuration")]
    Fetch(#[source] ClientError),
}
