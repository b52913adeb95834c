// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Preference session for Rover navigation settings.
//!
//! Orchestrates the initial bulk load, normalization, the mutation surface
//! consumed by the presentation layer, and the debounced commit scheduler
//! over an abstract [`PrefStore`]. Every field edit is staged in the store
//! immediately; the commit fires once per quiet window, carried by the
//! newest write's timer (epoch compare at fire time, no timer cancellation).

use std::sync::Arc;
use std::time::Duration;

use rover_prefs_core::constraint::apply_technology_constraint;
use rover_prefs_core::format::{self, PrefValue};
use rover_prefs_core::key::{PrefKey, Technology, PREF_DOMAIN};
use rover_prefs_core::model::PrefModel;
use rover_prefs_core::spec::{SpecRegistry, ValueSpec};
use rover_prefs_core::validate::snap_to_spec;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

pub use rover_prefs_core::store::{PrefStore, StoreError};

/// Quiet period after the last write request before a commit is issued.
pub const COMMIT_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Initial bulk fetch still in flight; mutations are rejected.
    Loading,
    /// Model available; mutations accepted.
    Ready,
}

/// Notifications emitted by a session for the presentation layer.
///
/// Delivery is best-effort: events are dropped when the receiver lags or
/// has been released.
#[derive(Debug)]
pub enum SessionEvent {
    /// Initial load finished; the model is available.
    Ready,
    /// A refresh picked up values changed outside this session.
    Refreshed,
    /// The store rejected a staged write or a commit.
    StoreError(StoreError),
}

/// Error type for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A mutation arrived before the initial load completed.
    #[error("session is still loading")]
    NotReady,
}

/// Raw fetch results, one slot per key, `None` for absent or failed reads.
struct RawPrefs {
    is_active: Option<String>,
    technology: Option<String>,
    max_distance: Option<String>,
    max_angle: Option<String>,
    go_home_timeout: Option<String>,
}

struct Inner {
    specs: SpecRegistry,
    model: PrefModel,
    state: SessionState,
    write_epoch: u64,
}

/// One user-facing editing session over the preference store.
///
/// All mutations share one write path: the model update and the store
/// staging happen immediately, while the expensive commit is debounced
/// across all keys.
pub struct PreferenceSession<S> {
    store: Arc<S>,
    inner: Arc<Mutex<Inner>>,
    events: mpsc::Sender<SessionEvent>,
}

impl<S> PreferenceSession<S>
where
    S: PrefStore + Send + Sync + 'static,
{
    /// Create a session over `store`, in the `Loading` state.
    ///
    /// The paired receiver delivers [`SessionEvent`]s; releasing it simply
    /// discards further events.
    pub fn new(store: S) -> (Self, mpsc::Receiver<SessionEvent>) {
        let (events, rx) = mpsc::channel(16);
        let session = Self {
            store: Arc::new(store),
            inner: Arc::new(Mutex::new(Inner {
                specs: SpecRegistry::new(),
                model: PrefModel::default(),
                state: SessionState::Loading,
                write_epoch: 0,
            })),
            events,
        };
        (session, rx)
    }

    /// Fetch every key concurrently, normalize, and transition to `Ready`.
    ///
    /// A failed individual fetch degrades to "absent" so one missing or
    /// unreadable preference can never fail the whole load; the parsers
    /// absorb it as the key's default.
    pub async fn load(&self) {
        let raw = self.fetch_all().await;

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        inner.model = normalize(&mut inner.specs, &raw);
        inner.state = SessionState::Ready;
        drop(guard);

        info!("preference session ready");
        let _ = self.events.try_send(SessionEvent::Ready);
    }

    /// Re-read every key from the store and re-run normalization.
    ///
    /// Meant for "preferences synchronized" notifications from the store;
    /// the store copy wins over local state. Returns whether the normalized
    /// model changed, also signalled as [`SessionEvent::Refreshed`].
    pub async fn refresh(&self) -> Result<bool, SessionError> {
        {
            let inner = self.inner.lock().await;
            if inner.state != SessionState::Ready {
                return Err(SessionError::NotReady);
            }
        }
        let raw = self.fetch_all().await;

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        let model = normalize(&mut inner.specs, &raw);
        let changed = model != inner.model;
        inner.model = model;
        drop(guard);

        if changed {
            let _ = self.events.try_send(SessionEvent::Refreshed);
        }
        Ok(changed)
    }

    /// Toggle autonomous navigation.
    pub async fn set_is_active(&self, is_active: bool) -> Result<(), SessionError> {
        self.write(PrefKey::IsActive, PrefValue::Bool(is_active))
            .await
    }

    /// Select the localization technology.
    ///
    /// Re-derives the MaxAngle ceiling immediately, before the change's
    /// commit can fire.
    pub async fn set_technology(&self, technology: Technology) -> Result<(), SessionError> {
        self.write(PrefKey::Technology, PrefValue::Technology(technology))
            .await?;
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        apply_technology_constraint(&mut inner.specs, &mut inner.model);
        Ok(())
    }

    /// Whether `key` can still step up inside its current range.
    ///
    /// Always false for the non-numeric keys.
    pub async fn can_increase(&self, key: PrefKey) -> bool {
        let inner = self.inner.lock().await;
        match (inner.specs.numeric(key), inner.model.number(key)) {
            (Some(spec), Some(value)) => value < spec.max,
            _ => false,
        }
    }

    /// Whether `key` can still step down inside its current range.
    pub async fn can_decrease(&self, key: PrefKey) -> bool {
        let inner = self.inner.lock().await;
        match (inner.specs.numeric(key), inner.model.number(key)) {
            (Some(spec), Some(value)) => value > spec.min,
            _ => false,
        }
    }

    /// Step `key` up by its spec step. No-op at or above the current max.
    pub async fn increase(&self, key: PrefKey) -> Result<(), SessionError> {
        let next = {
            let inner = self.inner.lock().await;
            if inner.state != SessionState::Ready {
                return Err(SessionError::NotReady);
            }
            match (inner.specs.numeric(key), inner.model.number(key)) {
                (Some(spec), Some(value)) if value < spec.max => Some(value + spec.step),
                _ => None,
            }
        };
        match next {
            Some(value) => self.write(key, PrefValue::Number(value)).await,
            None => Ok(()),
        }
    }

    /// Step `key` down by its spec step. No-op at or below the current min.
    pub async fn decrease(&self, key: PrefKey) -> Result<(), SessionError> {
        let next = {
            let inner = self.inner.lock().await;
            if inner.state != SessionState::Ready {
                return Err(SessionError::NotReady);
            }
            match (inner.specs.numeric(key), inner.model.number(key)) {
                (Some(spec), Some(value)) if value > spec.min => Some(value - spec.step),
                _ => None,
            }
        };
        match next {
            Some(value) => self.write(key, PrefValue::Number(value)).await,
            None => Ok(()),
        }
    }

    /// Snapshot of the current model.
    pub async fn model(&self) -> PrefModel {
        self.inner.lock().await.model.clone()
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state
    }

    /// Current numeric spec for `key` (reflects the live MaxAngle ceiling).
    pub async fn numeric_spec(&self, key: PrefKey) -> Option<ValueSpec> {
        self.inner.lock().await.specs.numeric(key).copied()
    }

    /// Stage one preference write and (re)arm the debounced commit.
    async fn write(&self, key: PrefKey, value: PrefValue) -> Result<(), SessionError> {
        let epoch = {
            let mut inner = self.inner.lock().await;
            if inner.state != SessionState::Ready {
                return Err(SessionError::NotReady);
            }
            inner.model.set(key, value);
            inner.write_epoch += 1;
            inner.write_epoch
        };

        // Staging is immediate; only the commit is debounced.
        let encoded = value.to_string();
        if let Err(err) = self.store.set_pref(PREF_DOMAIN, key.name(), &encoded).await {
            warn!(key = key.name(), %err, "failed to stage preference write");
            let _ = self.events.try_send(SessionEvent::StoreError(err));
        }
        self.arm_commit(epoch);
        Ok(())
    }

    /// Arm the commit timer for `epoch`.
    ///
    /// If a newer write bumps the live epoch before this timer fires, the
    /// timer does nothing and the newer write's timer owns the commit.
    fn arm_commit(&self, epoch: u64) {
        let store = Arc::clone(&self.store);
        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(COMMIT_DEBOUNCE).await;
            if inner.lock().await.write_epoch != epoch {
                return;
            }
            if let Err(err) = store.update_prefs().await {
                warn!(%err, "preference commit failed");
                let _ = events.try_send(SessionEvent::StoreError(err));
            }
        });
    }

    async fn fetch_all(&self) -> RawPrefs {
        let (is_active, technology, max_distance, max_angle, go_home_timeout) = tokio::join!(
            self.fetch(PrefKey::IsActive),
            self.fetch(PrefKey::Technology),
            self.fetch(PrefKey::MaxDistance),
            self.fetch(PrefKey::MaxAngle),
            self.fetch(PrefKey::GoHomeTimeout),
        );
        RawPrefs {
            is_active,
            technology,
            max_distance,
            max_angle,
            go_home_timeout,
        }
    }

    async fn fetch(&self, key: PrefKey) -> Option<String> {
        match self.store.get_pref(PREF_DOMAIN, key.name()).await {
            Ok(value) => value,
            Err(err) => {
                warn!(key = key.name(), %err, "pref fetch failed; falling back to default");
                None
            }
        }
    }
}

/// Run the load pipeline: parse, re-derive the technology constraint, then
/// range-check the numeric values. Order matters: the constraint must see
/// the loaded technology before the range check sees the lowered ceiling.
fn normalize(specs: &mut SpecRegistry, raw: &RawPrefs) -> PrefModel {
    let mut model = PrefModel {
        is_active: format::parse_bool(raw.is_active.as_deref()),
        technology: format::parse_technology(raw.technology.as_deref()),
        max_distance: format::parse_number(raw.max_distance.as_deref()),
        max_angle: format::parse_number(raw.max_angle.as_deref()),
        go_home_timeout: format::parse_number(raw.go_home_timeout.as_deref()),
    };
    apply_technology_constraint(specs, &mut model);
    for key in [
        PrefKey::MaxDistance,
        PrefKey::MaxAngle,
        PrefKey::GoHomeTimeout,
    ] {
        if let (Some(spec), Some(value)) = (specs.numeric(key), model.number(key)) {
            model.set(key, PrefValue::Number(snap_to_spec(spec, value)));
        }
    }
    model
}
