//! Property-source merge and placeholder resolution for remote
//! configuration.
//!
//! This crate turns the configuration document served by a config server
//! into a flat, immutable snapshot: the ordered property sources inside the
//! document are merged first-wins, every string value has its
//! `${VAR:default}` placeholder resolved against the local environment, and
//! [`RemoteConfigStore`] serves reads from the snapshot with
//! environment-variable fallback for keys the server does not define.

mod env;
mod error;
mod resolver;
mod snapshot;
mod store;

pub use env::{Environment, MapEnv, ProcessEnv};
pub use error::SyncError;
pub use resolver::{ResolvedValue, Resolver};
pub use snapshot::{PropertySource, Snapshot};
pub use store::{RemoteConfigStore, StoreSettings};
