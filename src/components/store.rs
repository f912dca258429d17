// Durable single-slot store for the pending navigation intent. The slot is
// the hand-off between OS-level background delivery and in-app navigation,
// so it must survive cold start and be readable before routing mounts.

use std::sync::Arc;

use super::capability::KeyValueBackend;
use super::{DispatchError, DispatchResult, NavigationIntent};

/// Well-known storage key holding the JSON-serialized pending intent.
pub const PENDING_INTENT_KEY: &str = "push_dispatch.pending_intent";

/// Single-slot persisted store: at most one pending intent exists at any
/// time, and a new save overwrites the previous value. Only the most recent
/// notification's destination is meaningful to a returning user.
#[derive(Clone)]
pub struct IntentStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl IntentStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Persist `intent`, overwriting any previously saved one.
    pub async fn save(&self, intent: &NavigationIntent) -> DispatchResult<()> {
        let serialized =
            serde_json::to_string(intent).map_err(|error| DispatchError::StorageFailure {
                operation: "serialize",
                key: PENDING_INTENT_KEY.to_string(),
                message: error.to_string(),
            })?;
        self.backend
            .persist(PENDING_INTENT_KEY.to_string(), serialized)
            .await
    }

    /// Read the slot without consuming it.
    ///
    /// A failed read or a corrupt slot reads as "no pending intent": losing
    /// one navigation hint beats breaking the navigation flow.
    pub async fn load(&self) -> Option<NavigationIntent> {
        let raw = match self.backend.read(PENDING_INTENT_KEY.to_string()).await {
            Ok(value) => value?,
            Err(error) => {
                tracing::warn!(%error, "pending intent read failed, treating slot as empty");
                return None;
            },
        };
        match serde_json::from_str(&raw) {
            Ok(intent) => Some(intent),
            Err(error) => {
                tracing::warn!(%error, "pending intent slot is corrupt, treating slot as empty");
                None
            },
        }
    }

    /// Empty the slot.
    pub async fn clear(&self) -> DispatchResult<()> {
        self.backend.remove(PENDING_INTENT_KEY.to_string()).await
    }
}
