// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `PrefStore` for Rover tools (uses platform config dir).
//!
//! One JSON object file per preference domain. `set_pref` lands in an
//! in-memory working copy; `update_prefs` merges that copy into the domain
//! file and writes it, which is the durable step. Reads observe the working
//! copy first, then the file.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use directories::ProjectDirs;
use rover_prefs_core::store::{PrefStore, StoreError};
use tokio::sync::Mutex;

/// Store preference domains as JSON files under the platform config directory.
pub struct FsPrefStore {
    base: PathBuf,
    staged: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl FsPrefStore {
    /// Create a store rooted at the user config directory (e.g., `~/.config/Rover`).
    pub fn new() -> Result<Self, StoreError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "Rover")
            .ok_or_else(|| StoreError::Other("could not resolve config dir".into()))?;
        Ok(Self::with_base(proj.config_dir().to_path_buf()))
    }

    /// Create a store rooted at an explicit directory.
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            base,
            staged: Mutex::new(HashMap::new()),
        }
    }

    fn path_for(&self, domain: &str) -> PathBuf {
        self.base.join(format!("{domain}.json"))
    }

    fn read_domain(&self, domain: &str) -> Result<HashMap<String, String>, StoreError> {
        match fs::read(self.path_for(domain)) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }
}

#[async_trait]
impl PrefStore for FsPrefStore {
    async fn get_pref(&self, domain: &str, key: &str) -> Result<Option<String>, StoreError> {
        {
            let staged = self.staged.lock().await;
            if let Some(value) = staged.get(domain).and_then(|values| values.get(key)) {
                return Ok(Some(value.clone()));
            }
        }
        let mut values = self.read_domain(domain)?;
        Ok(values.remove(key))
    }

    async fn set_pref(&self, domain: &str, key: &str, value: &str) -> Result<(), StoreError> {
        let mut staged = self.staged.lock().await;
        staged
            .entry(domain.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn update_prefs(&self) -> Result<(), StoreError> {
        let mut staged = self.staged.lock().await;
        for (domain, values) in staged.iter() {
            let mut merged = self.read_domain(domain)?;
            merged.extend(values.clone());
            fs::create_dir_all(&self.base)?;
            let data = serde_json::to_vec_pretty(&merged)?;
            fs::write(self.path_for(domain), data)?;
        }
        // Committed values are durable now; reads fall through to the files.
        staged.clear();
        Ok(())
    }
}
