// Acquisition and persistence of the device's push-messaging identity.
// Token acquisition is best-effort: failures are logged and swallowed, never
// surfaced to the host, and the only retry path is the next explicit
// `register` call.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use super::capability::{KeyValueBackend, PermissionGateway};
use super::{DeviceToken, PermissionResult};

/// Well-known storage key holding the last-obtained token value as a plain
/// string, so other parts of the app can read it without re-requesting.
pub const DEVICE_TOKEN_KEY: &str = "push_dispatch.device_token";

pub struct TokenManager {
    gateway: Arc<dyn PermissionGateway>,
    storage: Arc<dyn KeyValueBackend>,
    cached: Mutex<Option<DeviceToken>>,
}

impl TokenManager {
    pub fn new(gateway: Arc<dyn PermissionGateway>, storage: Arc<dyn KeyValueBackend>) -> Self {
        Self {
            gateway,
            storage,
            cached: Mutex::new(None),
        }
    }

    /// Request notification permission and, when granted or provisional,
    /// obtain and persist the device token.
    ///
    /// Returns the permission outcome. On `Denied` the token capability is
    /// never invoked. A token failure leaves the previous token (if any)
    /// untouched.
    pub async fn register(&self) -> PermissionResult {
        let permission = match self.gateway.request_permission().await {
            Ok(permission) => permission,
            Err(error) => {
                tracing::warn!(%error, "permission request failed");
                return PermissionResult::Denied;
            },
        };

        if !permission.allows_token() {
            tracing::info!("notification permission denied, skipping token acquisition");
            return permission;
        }

        match self.gateway.obtain_token().await {
            Ok(value) => {
                let token = DeviceToken {
                    value,
                    obtained_at: Utc::now(),
                };
                if let Err(error) = self
                    .storage
                    .persist(DEVICE_TOKEN_KEY.to_string(), token.value.clone())
                    .await
                {
                    tracing::warn!(%error, "device token persistence failed");
                }
                tracing::info!(permission = ?permission, "device token acquired");
                *self.cached.lock() = Some(token);
            },
            Err(error) => {
                tracing::warn!(%error, "device token unavailable");
            },
        }

        permission
    }

    /// The current token value: the one acquired in this process, falling
    /// back to the persisted copy from a previous run.
    pub async fn token(&self) -> Option<String> {
        if let Some(token) = self.cached.lock().clone() {
            return Some(token.value);
        }
        match self.storage.read(DEVICE_TOKEN_KEY.to_string()).await {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, "device token read failed");
                None
            },
        }
    }

    /// The token obtained during this process run, with its acquisition time.
    /// `None` when `register` has not succeeded yet.
    pub fn current(&self) -> Option<DeviceToken> {
        self.cached.lock().clone()
    }
}
