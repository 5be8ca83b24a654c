//! Remote config store.
//!
//! Responsibilities:
//! - Own the current [`Snapshot`] and refresh it from the config server.
//! - Serve the read operations, falling back to the environment for keys
//!   the snapshot does not define.
//!
//! Does NOT handle:
//! - HTTP mechanics (see the client crate).
//! - Placeholder grammar (see resolver.rs).
//!
//! Invariants:
//! - At most one sync is in flight; the refresh lock is held across the
//!   whole network round trip.
//! - Readers always observe a fully built snapshot; a failed sync leaves
//!   the previous one in place.
//! - Read operations never fail and never block on an in-flight sync.

use std::sync::{Arc, RwLock};

use tracing::debug;

use cloudconfig_client::{ClientConfig, ClientError, ConfigClient};

use crate::env::{Environment, ProcessEnv};
use crate::error::SyncError;
use crate::resolver::{ResolvedValue, Resolver};
use crate::snapshot::Snapshot;

/// Settings for a [`RemoteConfigStore`].
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Service (application) name, the first request path segment.
    pub service: String,
    /// Profile name (e.g. `production`), the second request path segment.
    pub profile: String,
    /// Optional label (e.g. a branch name), the third request path segment.
    pub label: Option<String>,
    /// Transport settings for the config server.
    pub remote: ClientConfig,
}

impl StoreSettings {
    /// Settings for `service` in `profile`, without a label.
    pub fn new(
        service: impl Into<String>,
        profile: impl Into<String>,
        remote: ClientConfig,
    ) -> Self {
        Self {
            service: service.into(),
            profile: profile.into(),
            label: None,
            remote,
        }
    }

    /// Select a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Where a read operation found its answer.
enum Lookup {
    /// The merged snapshot defines the key.
    Snapshot(ResolvedValue),
    /// The key fell through to the environment.
    Environment(Option<String>),
}

/// Store of remote configuration with environment fallback.
///
/// [`sync`](Self::sync) fetches the configuration document and publishes a
/// merged snapshot; the read operations consult the snapshot first and fall
/// back to the environment for keys the server does not define. A store
/// that has never synced behaves as if its snapshot were empty.
///
/// # Example
///
/// ```rust,ignore
/// use cloudconfig_client::ClientConfig;
/// use cloudconfig_store::{RemoteConfigStore, StoreSettings};
///
/// let store = RemoteConfigStore::new(StoreSettings::new(
///     "accountservice",
///     "production",
///     ClientConfig::new("http://localhost:8888"),
/// ))?;
/// store.sync().await?;
/// let port = store.getenv_with_fallback("server_port", "8080");
/// ```
pub struct RemoteConfigStore {
    client: ConfigClient,
    service: String,
    profile: String,
    label: Option<String>,
    env: Arc<dyn Environment>,
    resolver: Resolver,
    /// Serializes sync calls end to end, network round trip included.
    refresh_lock: tokio::sync::Mutex<()>,
    /// Published snapshot. Replaced wholesale on a successful sync, never
    /// mutated in place.
    snapshot: RwLock<Arc<Snapshot>>,
}

impl RemoteConfigStore {
    /// Build a store reading fallbacks from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when the transport settings are invalid (see
    /// [`ConfigClient::new`]).
    pub fn new(settings: StoreSettings) -> Result<Self, ClientError> {
        Self::with_environment(settings, Arc::new(ProcessEnv))
    }

    /// Build a store resolving placeholders and fallbacks against `env`.
    pub fn with_environment(
        settings: StoreSettings,
        env: Arc<dyn Environment>,
    ) -> Result<Self, ClientError> {
        let client = ConfigClient::new(settings.remote)?;
        Ok(Self {
            client,
            service: settings.service,
            profile: settings.profile,
            label: settings.label,
            resolver: Resolver::new(Arc::clone(&env)),
            env,
            refresh_lock: tokio::sync::Mutex::new(()),
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
        })
    }

    /// Fetch the configuration document and publish a fresh snapshot.
    ///
    /// Concurrent calls are serialized; the refresh lock is held across the
    /// network round trip so at most one fetch is in flight. On any failure
    /// the previously published snapshot stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::NotFound`] when the server answers 404,
    /// [`SyncError::InvalidPayload`] when the response lacks the expected
    /// property-source structure, and [`SyncError::Fetch`] for any other
    /// transport failure.
    pub async fn sync(&self) -> Result<(), SyncError> {
        let _guard = self.refresh_lock.lock().await;

        let document = self
            .client
            .get_config(&self.service, &self.profile, self.label.as_deref())
            .await
            .map_err(|err| match err.status() {
                Some(404) => SyncError::NotFound,
                _ => SyncError::Fetch(err),
            })?;

        let snapshot = Snapshot::from_document(&document, &self.resolver)?;
        debug!(
            service = %self.service,
            profile = %self.profile,
            keys = snapshot.len(),
            "Configuration snapshot refreshed"
        );

        let mut published = self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *published = Arc::new(snapshot);
        Ok(())
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let published = self
            .snapshot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&published)
    }

    fn lookup(&self, key: &str) -> Lookup {
        match self.snapshot().get(key) {
            Some(entry) => Lookup::Snapshot(entry.clone()),
            None => Lookup::Environment(self.env.lookup(key)),
        }
    }

    /// Value of `key`, or the empty string.
    ///
    /// A key the snapshot defines returns its merged value even when its
    /// placeholder failed to resolve (that value is the empty string). A
    /// key the snapshot does not define falls back to the environment.
    pub fn getenv(&self, key: &str) -> String {
        match self.lookup(key) {
            Lookup::Snapshot(entry) => entry.value,
            Lookup::Environment(value) => value.unwrap_or_default(),
        }
    }

    /// Like [`getenv`](Self::getenv), but substituting `fallback` whenever
    /// no resolved value exists: for a snapshot entry whose placeholder
    /// did not resolve, and for a key absent from both the snapshot and the
    /// environment.
    pub fn getenv_with_fallback(&self, key: &str, fallback: &str) -> String {
        match self.lookup(key) {
            Lookup::Snapshot(entry) if entry.resolved => entry.value,
            Lookup::Snapshot(_) => fallback.to_string(),
            Lookup::Environment(Some(value)) => value,
            Lookup::Environment(None) => fallback.to_string(),
        }
    }

    /// Presence-aware lookup.
    ///
    /// For a key the snapshot defines, `Some(value)` when its placeholder
    /// resolved and `None` otherwise. For any other key, the environment's
    /// own answer.
    pub fn lookup_env(&self, key: &str) -> Option<String> {
        match self.lookup(key) {
            Lookup::Snapshot(entry) => entry.resolved.then_some(entry.value),
            Lookup::Environment(value) => value,
        }
    }
}
