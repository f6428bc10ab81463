//! Resync invoker
//!
//! Coordinates the remote resync call with the dialog state:
//! 1. Mark the controller as syncing (the lock against overlapping calls)
//! 2. Call the remote operation
//! 3. Classify the result, invalidate function listings, notify on success
//!
//! The in-flight flag is always released, whether the call succeeds,
//! fails, panics, or its future is dropped.

use log::{debug, info, warn};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{OverrideInput, ResyncView};
use crate::cache::{CacheInvalidator, CacheTag};
use crate::client::ResyncClient;
use crate::models::{
    AppId, AppSnapshot, CodedError, EnvironmentId, ResyncOutcome, ResyncRequest, ResyncResponse,
};
use crate::notify::{Notification, Notifier};

/// Tags dropped after every resync that reached the server
const INVALIDATED_TAGS: &[CacheTag] = &[CacheTag::Functions];

/// Collaborators injected into a controller
#[derive(Clone)]
pub struct ControllerDeps {
    pub client: Arc<dyn ResyncClient>,
    pub cache: Arc<dyn CacheInvalidator>,
    pub notifier: Arc<dyn Notifier>,
}

/// What the host should do after a resync settles
#[derive(Debug, Clone, PartialEq)]
pub enum ResyncSignal {
    /// Success: close the dialog
    Close { app_id: AppId },
    /// Failure: keep the dialog open, the failure is in `last_failure`
    Failed(CodedError),
    /// Nothing was dispatched (already syncing, closed, or not submittable)
    Ignored,
}

/// Token for one dispatched resync
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    id: u64,
    pub request: ResyncRequest,
}

impl Attempt {
    pub fn id(&self) -> u64 {
        self.id
    }
}

struct ControllerState {
    input: OverrideInput,
    last_failure: Option<CodedError>,
    is_syncing: bool,
    closed: bool,
    /// Id of the most recent attempt
    attempt: u64,
}

impl ControllerState {
    fn can_submit(&self, app: &AppSnapshot) -> bool {
        if self.is_syncing || self.closed {
            return false;
        }
        // A connected app can only be migrated to a URL the user supplied
        !app.method.is_migration() || self.input.is_enabled()
    }
}

/// State and behavior behind one open resync dialog
///
/// Share it behind an `Arc` so the host can read state while a
/// [`trigger_resync`](Self::trigger_resync) future is pending.
pub struct ResyncController {
    app: AppSnapshot,
    env_id: EnvironmentId,
    deps: ControllerDeps,
    state: Mutex<ControllerState>,
}

impl ResyncController {
    /// Create fresh state for a dialog opened on `app`
    pub fn open(app: AppSnapshot, env_id: EnvironmentId, deps: ControllerDeps) -> Self {
        debug!(
            "Opening resync for {} in env {} ({:?})",
            app.external_id, env_id, app.method
        );
        let state = ControllerState {
            input: OverrideInput::new(app.url.clone()),
            last_failure: None,
            is_syncing: false,
            closed: false,
            attempt: 0,
        };
        Self {
            app,
            env_id,
            deps,
            state: Mutex::new(state),
        }
    }

    fn state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn app(&self) -> &AppSnapshot {
        &self.app
    }

    pub fn env_id(&self) -> EnvironmentId {
        self.env_id
    }

    // === Input resolution ===

    pub fn set_override_enabled(&self, enabled: bool) {
        self.state().input.set_enabled(enabled);
    }

    pub fn set_override_value(&self, value: impl Into<String>) {
        self.state().input.set_value(value);
    }

    pub fn effective_url(&self) -> String {
        self.state().input.effective_url().to_string()
    }

    pub fn is_overridden(&self) -> bool {
        self.state().input.is_enabled()
    }

    /// Override buffer contents, in effect or not
    pub fn override_value(&self) -> String {
        self.state().input.value().to_string()
    }

    // === Status ===

    pub fn is_syncing(&self) -> bool {
        self.state().is_syncing
    }

    pub fn last_failure(&self) -> Option<CodedError> {
        self.state().last_failure.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    /// Whether the confirm action is enabled
    pub fn can_submit(&self) -> bool {
        self.state().can_submit(&self.app)
    }

    pub fn view(&self) -> ResyncView {
        let state = self.state();
        ResyncView::build(
            &self.app,
            &state.input,
            state.is_syncing,
            state.can_submit(&self.app),
            state.last_failure.as_ref(),
        )
    }

    /// Discard the dialog. Results arriving afterwards only invalidate the cache.
    pub fn close(&self) {
        let mut state = self.state();
        if state.is_syncing {
            debug!(
                "Closing resync for {} with attempt {} still in flight",
                self.app.external_id, state.attempt
            );
        }
        state.closed = true;
    }

    // === Invocation ===

    /// Run one resync end to end
    ///
    /// Returns [`ResyncSignal::Ignored`] without dispatching anything when a
    /// resync is already in flight, the dialog is closed, or a connected app
    /// has no override URL.
    pub async fn trigger_resync(&self) -> ResyncSignal {
        let Some(attempt) = self.begin_resync() else {
            return ResyncSignal::Ignored;
        };

        let _in_flight = InFlight {
            controller: self,
            attempt: attempt.id,
        };
        let result = self.deps.client.resync_app(&attempt.request).await;
        self.finish_resync(attempt, result)
    }

    /// First half of a resync for hosts that run the call themselves
    ///
    /// Marks the controller as syncing and returns the request to send.
    /// The host must pass the result to [`finish_resync`](Self::finish_resync).
    pub fn begin_resync(&self) -> Option<Attempt> {
        let mut state = self.state();

        if state.closed {
            debug!("Ignoring resync for {}: dialog closed", self.app.external_id);
            return None;
        }
        if state.is_syncing {
            debug!(
                "Ignoring resync for {}: attempt {} in flight",
                self.app.external_id, state.attempt
            );
            return None;
        }
        if !state.can_submit(&self.app) {
            debug!(
                "Ignoring resync for {}: migration needs an override URL",
                self.app.external_id
            );
            return None;
        }

        state.attempt += 1;
        state.is_syncing = true;

        let request = ResyncRequest {
            app_external_id: self.app.external_id.clone(),
            app_url: state.input.override_url().map(str::to_string),
            env_id: self.env_id,
        };

        info!(
            "Resyncing {} (attempt {}, url {})",
            self.app.external_id,
            state.attempt,
            state.input.effective_url()
        );

        Some(Attempt {
            id: state.attempt,
            request,
        })
    }

    /// Second half of a resync: record the result of `attempt`
    pub fn finish_resync<E: Display>(
        &self,
        attempt: Attempt,
        result: Result<ResyncResponse, E>,
    ) -> ResyncSignal {
        let reached_server = result.is_ok();
        if let Err(e) = &result {
            warn!("Resync of {} did not complete: {:#}", self.app.external_id, e);
        }
        let outcome = ResyncOutcome::from_result(result);

        // The server may have changed state even if nobody is listening any more
        if reached_server {
            self.deps.cache.invalidate(INVALIDATED_TAGS);
        }

        let signal = {
            let mut state = self.state();
            if !state.is_syncing || state.attempt != attempt.id {
                debug!(
                    "Dropping stale result of resync attempt {} for {}",
                    attempt.id, self.app.external_id
                );
                return ResyncSignal::Ignored;
            }

            state.is_syncing = false;
            if state.closed {
                if outcome.is_success() {
                    info!(
                        "Resynced {} after its dialog closed",
                        self.app.external_id
                    );
                }
                debug!(
                    "Dropping result of resync attempt {} for {}: dialog closed",
                    attempt.id, self.app.external_id
                );
                return ResyncSignal::Ignored;
            }

            state.last_failure = outcome.failure().cloned();
            match outcome {
                ResyncOutcome::Success { app_id } => ResyncSignal::Close { app_id },
                ResyncOutcome::ApplicationError(error) | ResyncOutcome::TransportFailure(error) => {
                    ResyncSignal::Failed(error)
                }
            }
        };

        match &signal {
            ResyncSignal::Close { app_id } => {
                info!("Resynced {} (app {})", self.app.external_id, app_id);
                self.deps.notifier.notify(Notification::success(self.success_message()));
            }
            ResyncSignal::Failed(error) => {
                warn!("Resync of {} failed: {}", self.app.external_id, error);
            }
            ResyncSignal::Ignored => {}
        }

        signal
    }

    fn success_message(&self) -> String {
        if self.app.method.is_migration() {
            format!("Migrated {} to serve", self.app.external_id)
        } else {
            format!("Resynced {}", self.app.external_id)
        }
    }
}

/// Releases the in-flight flag if a resync future ends without finishing
struct InFlight<'a> {
    controller: &'a ResyncController,
    attempt: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.controller.state();
        if state.is_syncing && state.attempt == self.attempt {
            warn!(
                "Resync attempt {} for {} ended without a result",
                self.attempt, self.controller.app.external_id
            );
            state.is_syncing = false;
        }
    }
}
