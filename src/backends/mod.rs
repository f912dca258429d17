// Capability implementations, selected per platform at startup through a
// single factory so the dispatcher state machine stays platform-agnostic.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

pub mod file_store;
#[cfg(target_os = "linux")]
pub mod linux;
pub mod memory;

pub use file_store::FileStore;
pub use memory::MemoryStore;

use crate::components::capability::{KeyValueBackend, PermissionGateway, PresentationSink};
use crate::components::{DispatchError, DispatchResult, NormalizedNotification, PermissionResult};

/// Presentation sink for platforms without local notification support: logs
/// the banner and reports success.
pub struct NoopSink;

impl PresentationSink for NoopSink {
    fn display(
        &self,
        notification: NormalizedNotification,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>> {
        tracing::debug!(
            title = %notification.title,
            "no native display on this platform, dropping banner"
        );
        Box::pin(async { Ok(()) })
    }
}

/// Permission gateway for hosts without a push-delivery mechanism. Desktop
/// builds have no FCM/APNs equivalent: permission reads as denied and tokens
/// are never available.
pub struct UnsupportedGateway;

impl PermissionGateway for UnsupportedGateway {
    fn request_permission(
        &self,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<PermissionResult>> + Send + '_>> {
        Box::pin(async { Ok(PermissionResult::Denied) })
    }

    fn obtain_token(&self) -> Pin<Box<dyn Future<Output = DispatchResult<String>> + Send + '_>> {
        Box::pin(async {
            Err(DispatchError::TokenUnavailable {
                reason: "push delivery is not available on this platform".to_string(),
            })
        })
    }
}

/// Factory for the concrete capabilities of the current platform.
pub struct BackendFactory;

impl BackendFactory {
    /// Durable storage rooted at `dir`, cold-start safe.
    pub fn storage(dir: impl Into<PathBuf>) -> Arc<dyn KeyValueBackend> {
        Arc::new(FileStore::new(dir))
    }

    /// A native banner display where the platform has one, a logging no-op
    /// elsewhere.
    pub fn presentation_sink(app_name: &str) -> Arc<dyn PresentationSink> {
        #[cfg(target_os = "linux")]
        {
            Arc::new(linux::DbusSink::new(app_name))
        }
        #[cfg(not(target_os = "linux"))]
        {
            let _ = app_name;
            Arc::new(NoopSink)
        }
    }

    /// The platform's permission/token gateway. Hosts with a real push
    /// transport (mobile shells, web service workers) substitute their own.
    pub fn permission_gateway() -> Arc<dyn PermissionGateway> {
        Arc::new(UnsupportedGateway)
    }
}
