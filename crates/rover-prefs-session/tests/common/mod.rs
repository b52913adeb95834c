// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory store double that records staging and commit activity.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rover_prefs_core::store::{PrefStore, StoreError};

/// Cloneable recording store; clones share state so tests can keep a handle
/// after handing one to the session.
#[derive(Clone, Default)]
pub struct RecordingStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    values: Mutex<HashMap<String, String>>,
    staged_log: Mutex<Vec<(String, String)>>,
    commits: Mutex<Vec<HashMap<String, String>>>,
    fail_gets: Mutex<HashSet<String>>,
    fail_stage: Mutex<bool>,
    fail_commit: Mutex<bool>,
}

impl RecordingStore {
    pub fn seeded(pairs: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (key, value) in pairs {
            store.seed(key, value);
        }
        store
    }

    /// Put a value into the working copy without logging it as staged.
    pub fn seed(&self, key: &str, value: &str) {
        self.inner
            .values
            .lock()
            .unwrap()
            .insert(key.into(), value.into());
    }

    /// Make every `get_pref` for `key` fail.
    pub fn fail_get(&self, key: &str) {
        self.inner.fail_gets.lock().unwrap().insert(key.into());
    }

    pub fn set_fail_stage(&self, fail: bool) {
        *self.inner.fail_stage.lock().unwrap() = fail;
    }

    pub fn set_fail_commit(&self, fail: bool) {
        *self.inner.fail_commit.lock().unwrap() = fail;
    }

    /// Every (key, value) staged by the session, in order.
    pub fn staged_log(&self) -> Vec<(String, String)> {
        self.inner.staged_log.lock().unwrap().clone()
    }

    pub fn commit_count(&self) -> usize {
        self.inner.commits.lock().unwrap().len()
    }

    /// Working-copy snapshot taken at the most recent commit.
    pub fn last_commit(&self) -> Option<HashMap<String, String>> {
        self.inner.commits.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PrefStore for RecordingStore {
    async fn get_pref(&self, _domain: &str, key: &str) -> Result<Option<String>, StoreError> {
        if self.inner.fail_gets.lock().unwrap().contains(key) {
            return Err(StoreError::Other(format!("injected get failure: {key}")));
        }
        Ok(self.inner.values.lock().unwrap().get(key).cloned())
    }

    async fn set_pref(&self, _domain: &str, key: &str, value: &str) -> Result<(), StoreError> {
        if *self.inner.fail_stage.lock().unwrap() {
            return Err(StoreError::Other("injected stage failure".into()));
        }
        self.inner
            .values
            .lock()
            .unwrap()
            .insert(key.into(), value.into());
        self.inner
            .staged_log
            .lock()
            .unwrap()
            .push((key.into(), value.into()));
        Ok(())
    }

    async fn update_prefs(&self) -> Result<(), StoreError> {
        if *self.inner.fail_commit.lock().unwrap() {
            return Err(StoreError::Other("injected commit failure".into()));
        }
        let snapshot = self.inner.values.lock().unwrap().clone();
        self.inner.commits.lock().unwrap().push(snapshot);
        Ok(())
    }
}
