// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Asynchronous port to the remote preference store.

use async_trait::async_trait;
use thiserror::Error;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while reading or writing the backing store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure in the backing store.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Remote preference store, keyed by domain + key, speaking strings only.
///
/// `set_pref` stages a value in the store's working copy with no durability
/// guarantee of its own; `update_prefs` commits everything staged and is the
/// unit of durability. Reads observe the working copy.
#[async_trait]
pub trait PrefStore: Send + Sync {
    /// Read one raw value. Absent keys are `Ok(None)`, not an error.
    async fn get_pref(&self, domain: &str, key: &str) -> Result<Option<String>, StoreError>;

    /// Stage one key's value for a later commit.
    async fn set_pref(&self, domain: &str, key: &str, value: &str) -> Result<(), StoreError>;

    /// Commit all currently staged values.
    async fn update_prefs(&self) -> Result<(), StoreError>;
}
