// Core data model for the notification-driven navigation dispatcher.
// Shapes mirror the vendor push payload on the wire and the two persisted
// storage slots (pending navigation intent, device token).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod capability;
pub mod dispatcher;
pub mod normalizer;
pub mod store;
pub mod token;

pub use capability::{KeyValueBackend, Navigator, PermissionGateway, PresentationSink};
pub use dispatcher::{AppPhase, DispatchEvent, DispatchOutcome, DispatchRecord, Dispatcher};
pub use normalizer::{NormalizedPayload, RawContent, RawPayload, TARGET_SCREEN_KEY, normalize};
pub use store::{IntentStore, PENDING_INTENT_KEY};
pub use token::{DEVICE_TOKEN_KEY, TokenManager};

/// Identifier attached to each handled event for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchId(Uuid);

impl DispatchId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for DispatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A push notification reduced to the canonical displayable shape.
///
/// `title` and `body` default to the empty string when the source payload
/// omits them; downstream code never sees an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedNotification {
    pub title: String,
    pub body: String,
    /// String entries of the payload's `data` block, passed through verbatim.
    pub data: HashMap<String, String>,
}

/// A deferred navigation instruction awaiting execution once the app can
/// navigate.
///
/// Exclusively owned by the durable intent store from creation until it is
/// consumed exactly once by the navigator, or overwritten by a newer intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationIntent {
    pub target_path: String,
    pub params: HashMap<String, String>,
}

impl NavigationIntent {
    pub fn new(target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// The device's push-messaging identity. The token manager is the sole writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceToken {
    pub value: String,
    pub obtained_at: DateTime<Utc>,
}

/// Outcome of a platform permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionResult {
    Granted,
    Provisional,
    Denied,
}

impl PermissionResult {
    /// Whether token acquisition may proceed under this permission level.
    pub fn allows_token(&self) -> bool {
        matches!(
            self,
            PermissionResult::Granted | PermissionResult::Provisional
        )
    }
}

/// Failures raised at the capability boundary.
///
/// None of these propagate to the host as user-visible errors; the dispatcher
/// and token manager convert each into a logged event at the call site.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The user declined notification permission. Non-fatal; the feature
    /// degrades to "no push notifications".
    #[error("notification permission denied by the user")]
    PermissionDenied,

    /// The platform could not produce a device token. Retried only on the
    /// next explicit permission request.
    #[error("device token unavailable: {reason}")]
    TokenUnavailable { reason: String },

    /// A durable read/write failed. Readers treat this as "no pending
    /// intent" rather than surfacing it.
    #[error("storage {operation} failed for key '{key}': {message}")]
    StorageFailure {
        operation: &'static str,
        key: String,
        message: String,
    },

    /// The routing capability rejected the target path. The intent is
    /// discarded, never retried.
    #[error("navigation to '{path}' rejected by the router: {message}")]
    NavigationFailure { path: String, message: String },

    /// The platform declined to display a banner. Does not block persistence
    /// or replay.
    #[error("notification display failed: {message}")]
    PresentationFailure { message: String },
}

/// Result alias used throughout the dispatcher subsystem.
pub type DispatchResult<T> = Result<T, DispatchError>;
