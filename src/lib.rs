//! Notification-driven navigation dispatcher.
//!
//! Receives push notifications in any app lifecycle state, normalizes them
//! into a displayable notification plus a deferred navigation intent,
//! persists that intent durably across process restarts, and replays it
//! exactly once when the app can navigate again.
//!
//! The host wires its platform capabilities (permission gateway, durable
//! storage, banner display, router) through [`DispatcherBuilder`] and then
//! feeds lifecycle and notification events into [`Dispatcher::handle`].

use std::sync::Arc;

pub mod backends;
pub mod components;

// Re-export all components for convenience
pub use backends::*;
pub use components::*;

use components::capability::{KeyValueBackend, Navigator, PermissionGateway, PresentationSink};

/// The wired subsystem: the event dispatcher plus the token manager, sharing
/// one durable storage backend.
pub struct PushDispatch {
    pub dispatcher: Dispatcher,
    pub tokens: TokenManager,
}

/// Fluent wiring of the dispatcher against host capabilities.
///
/// Only the navigator is mandatory; storage, display, and the permission
/// gateway default to the [`BackendFactory`] selection for the current
/// platform.
pub struct DispatcherBuilder {
    navigator: Arc<dyn Navigator>,
    storage: Option<Arc<dyn KeyValueBackend>>,
    sink: Option<Arc<dyn PresentationSink>>,
    gateway: Option<Arc<dyn PermissionGateway>>,
}

impl DispatcherBuilder {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator,
            storage: None,
            sink: None,
            gateway: None,
        }
    }

    pub fn with_storage(mut self, storage: Arc<dyn KeyValueBackend>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_presentation_sink(mut self, sink: Arc<dyn PresentationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_permission_gateway(mut self, gateway: Arc<dyn PermissionGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn build(self) -> PushDispatch {
        let storage = self
            .storage
            .unwrap_or_else(|| BackendFactory::storage(".push-dispatch"));
        let sink = self
            .sink
            .unwrap_or_else(|| BackendFactory::presentation_sink("push-dispatch"));
        let gateway = self
            .gateway
            .unwrap_or_else(BackendFactory::permission_gateway);

        let store = IntentStore::new(Arc::clone(&storage));
        PushDispatch {
            dispatcher: Dispatcher::new(store, sink, self.navigator),
            tokens: TokenManager::new(gateway, storage),
        }
    }
}
