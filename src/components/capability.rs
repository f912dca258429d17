// Capability boundary: host-provided operations consumed as opaque contracts.
// Every call is a suspension point; implementations live in `crate::backends`
// or in the host application, and the dispatcher never assumes synchronous
// completion.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use super::{DispatchResult, NormalizedNotification, PermissionResult};

/// Platform permission and push-token acquisition.
pub trait PermissionGateway: Send + Sync {
    /// Ask the platform for notification permission.
    fn request_permission(
        &self,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<PermissionResult>> + Send + '_>>;

    /// Obtain the device's push-messaging token. Fails with
    /// `DispatchError::TokenUnavailable` when the platform cannot produce one.
    fn obtain_token(&self) -> Pin<Box<dyn Future<Output = DispatchResult<String>> + Send + '_>>;
}

/// Durable key/value storage surviving process restarts.
///
/// Must be readable before the routing capability is initialized: the intent
/// slot is the hand-off between OS-level background delivery and in-app
/// navigation, which only runs once routing is mounted.
pub trait KeyValueBackend: Send + Sync {
    fn persist(
        &self,
        key: String,
        value: String,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>>;

    fn read(
        &self,
        key: String,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<Option<String>>> + Send + '_>>;

    fn remove(
        &self,
        key: String,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>>;
}

/// Displays a normalized notification as a platform-native banner or alert.
/// Best-effort; a no-op where the platform has no local notification support.
pub trait PresentationSink: Send + Sync {
    fn display(
        &self,
        notification: NormalizedNotification,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>>;
}

/// The host app's routing capability: navigate to a path with parameters.
/// No route-table validation happens on this side of the boundary.
pub trait Navigator: Send + Sync {
    fn navigate_to(
        &self,
        path: String,
        params: HashMap<String, String>,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>>;
}
