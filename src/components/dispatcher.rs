// The dispatcher state machine. Decides, per lifecycle phase and event,
// whether an inbound notification is displayed, its intent parked in the
// durable slot, or navigation executed immediately. The app-ready transition
// is the exactly-once replay point for a parked intent.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::capability::{Navigator, PresentationSink};
use super::normalizer::{self, NormalizedPayload, RawPayload};
use super::store::IntentStore;
use super::{DispatchId, NavigationIntent, NormalizedNotification};

/// Reachability of the host app for immediate navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppPhase {
    /// Routing is not mounted; navigation cannot execute now.
    #[default]
    BackgroundOrTerminated,
    /// Routing is mounted; navigation executes immediately.
    ForegroundActive,
}

/// Named lifecycle and notification events, delivered by the host's
/// subscription wiring to the single transition function.
#[derive(Debug, Clone)]
pub enum DispatchEvent {
    /// A push payload arrived from the platform delivery mechanism.
    NotificationReceived { payload: RawPayload },
    /// The user pressed a displayed notification.
    NotificationPressed { payload: RawPayload },
    /// The routing capability mounted (cold start finished, or resume).
    AppReady,
    /// The app moved to the background or is about to terminate.
    AppSuspended,
}

impl DispatchEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DispatchEvent::NotificationReceived { .. } => "notification_received",
            DispatchEvent::NotificationPressed { .. } => "notification_pressed",
            DispatchEvent::AppReady => "app_ready",
            DispatchEvent::AppSuspended => "app_suspended",
        }
    }
}

/// What a transition did, observable by hosts and tests without peeking at
/// dispatcher internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Notification displayed; no navigation intent carried or parked.
    Displayed,
    /// Notification displayed and its intent parked in the durable slot.
    DisplayedAndSaved { target_path: String },
    /// Intent parked without display (press before routing mounted).
    Saved { target_path: String },
    /// Intent executed immediately, bypassing the slot.
    Navigated { target_path: String },
    /// Parked intent replayed on app-ready; the slot is now empty.
    Replayed { target_path: String },
    /// Nothing to do for this transition.
    Idle,
}

/// One handled event, kept in a bounded in-memory history for debugging.
#[derive(Debug, Clone)]
pub struct DispatchRecord {
    pub id: DispatchId,
    pub event: &'static str,
    pub outcome: DispatchOutcome,
    pub at: DateTime<Utc>,
}

const HISTORY_LIMIT: usize = 64;

pub struct Dispatcher {
    phase: Mutex<AppPhase>,
    store: IntentStore,
    sink: Arc<dyn PresentationSink>,
    navigator: Arc<dyn Navigator>,
    history: Mutex<VecDeque<DispatchRecord>>,
}

impl Dispatcher {
    pub fn new(
        store: IntentStore,
        sink: Arc<dyn PresentationSink>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            phase: Mutex::new(AppPhase::default()),
            store,
            sink,
            navigator,
            history: Mutex::new(VecDeque::with_capacity(HISTORY_LIMIT)),
        }
    }

    pub fn phase(&self) -> AppPhase {
        *self.phase.lock()
    }

    /// Snapshot of the recent dispatch history, oldest first.
    pub fn history(&self) -> Vec<DispatchRecord> {
        self.history.lock().iter().cloned().collect()
    }

    /// The transition function. Never fails: every capability failure is
    /// converted to a logged event at the boundary where it occurred.
    pub async fn handle(&self, event: DispatchEvent) -> DispatchOutcome {
        let id = DispatchId::generate();
        let name = event.name();
        tracing::debug!(dispatch = %id, event = name, phase = ?self.phase(), "dispatching");

        let outcome = match event {
            DispatchEvent::NotificationReceived { payload } => self.on_received(id, &payload).await,
            DispatchEvent::NotificationPressed { payload } => self.on_pressed(id, &payload).await,
            DispatchEvent::AppReady => self.on_app_ready(id).await,
            DispatchEvent::AppSuspended => {
                *self.phase.lock() = AppPhase::BackgroundOrTerminated;
                DispatchOutcome::Idle
            },
        };

        self.record(id, name, outcome.clone());
        outcome
    }

    async fn on_received(&self, id: DispatchId, payload: &RawPayload) -> DispatchOutcome {
        let NormalizedPayload {
            notification,
            intent,
        } = normalizer::normalize(payload);
        let phase = self.phase();

        // Foreground receipt never auto-navigates; a press event decides.
        // Background receipt parks the intent for the app-ready replay, and a
        // newer arrival silently supersedes whatever was parked before.
        let saved = match (phase, intent) {
            (AppPhase::BackgroundOrTerminated, Some(intent)) => {
                self.park(id, &intent).await.then_some(intent.target_path)
            },
            _ => None,
        };

        // The OS will not auto-show foreground notifications, so the sink is
        // invoked in every phase. Display failure never blocks persistence.
        self.display(id, notification).await;

        match saved {
            Some(target_path) => DispatchOutcome::DisplayedAndSaved { target_path },
            None => DispatchOutcome::Displayed,
        }
    }

    async fn on_pressed(&self, id: DispatchId, payload: &RawPayload) -> DispatchOutcome {
        let NormalizedPayload { intent, .. } = normalizer::normalize(payload);
        let Some(intent) = intent else {
            return DispatchOutcome::Idle;
        };

        if self.phase() == AppPhase::ForegroundActive {
            self.navigate(id, &intent).await;
            DispatchOutcome::Navigated {
                target_path: intent.target_path,
            }
        } else {
            // Routing is not mounted yet; park for the app-ready replay.
            if self.park(id, &intent).await {
                DispatchOutcome::Saved {
                    target_path: intent.target_path,
                }
            } else {
                DispatchOutcome::Idle
            }
        }
    }

    async fn on_app_ready(&self, id: DispatchId) -> DispatchOutcome {
        *self.phase.lock() = AppPhase::ForegroundActive;

        let Some(intent) = self.store.load().await else {
            tracing::debug!(dispatch = %id, "app ready, no pending intent");
            return DispatchOutcome::Idle;
        };

        self.navigate(id, &intent).await;

        // Cleared even when navigation failed: a poison intent must not block
        // every future replay.
        if let Err(error) = self.store.clear().await {
            tracing::warn!(dispatch = %id, %error, "pending intent clear failed");
        }

        DispatchOutcome::Replayed {
            target_path: intent.target_path,
        }
    }

    async fn park(&self, id: DispatchId, intent: &NavigationIntent) -> bool {
        match self.store.save(intent).await {
            Ok(()) => {
                tracing::debug!(dispatch = %id, path = %intent.target_path, "parked navigation intent");
                true
            },
            Err(error) => {
                tracing::warn!(dispatch = %id, %error, "parking navigation intent failed");
                false
            },
        }
    }

    async fn display(&self, id: DispatchId, notification: NormalizedNotification) {
        if let Err(error) = self.sink.display(notification).await {
            tracing::warn!(dispatch = %id, %error, "notification display failed");
        }
    }

    async fn navigate(&self, id: DispatchId, intent: &NavigationIntent) {
        tracing::debug!(dispatch = %id, path = %intent.target_path, "navigating");
        if let Err(error) = self
            .navigator
            .navigate_to(intent.target_path.clone(), intent.params.clone())
            .await
        {
            // Invalid routes are the router's error to surface; the intent is
            // discarded either way.
            tracing::warn!(dispatch = %id, %error, "navigation rejected");
        }
    }

    fn record(&self, id: DispatchId, event: &'static str, outcome: DispatchOutcome) {
        let mut history = self.history.lock();
        if history.len() == HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(DispatchRecord {
            id,
            event,
            outcome,
            at: Utc::now(),
        });
    }
}
