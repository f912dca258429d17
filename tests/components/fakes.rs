//! Recording fakes for the capability boundary.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use parking_lot::Mutex;
use push_dispatch::components::capability::{Navigator, PermissionGateway, PresentationSink};
use push_dispatch::components::{
    DispatchError, DispatchResult, NormalizedNotification, PermissionResult, RawPayload,
};

/// Parse a JSON literal into a raw payload, as the platform delivery
/// mechanism would hand it over.
pub fn payload(value: serde_json::Value) -> RawPayload {
    serde_json::from_value(value).expect("well-formed test payload")
}

#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<NormalizedNotification>>,
    fail: Mutex<bool>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent display call fail.
    pub fn fail_displays(&self) {
        *self.fail.lock() = true;
    }

    pub fn displayed(&self) -> Vec<NormalizedNotification> {
        self.calls.lock().clone()
    }
}

impl PresentationSink for RecordingSink {
    fn display(
        &self,
        notification: NormalizedNotification,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>> {
        self.calls.lock().push(notification);
        let fail = *self.fail.lock();
        Box::pin(async move {
            if fail {
                Err(DispatchError::PresentationFailure {
                    message: "display unavailable".to_string(),
                })
            } else {
                Ok(())
            }
        })
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<(String, HashMap<String, String>)>>,
    reject: Mutex<bool>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent navigation fail, as a router does for an
    /// unknown route.
    pub fn reject_navigations(&self) {
        *self.reject.lock() = true;
    }

    pub fn navigations(&self) -> Vec<(String, HashMap<String, String>)> {
        self.calls.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(
        &self,
        path: String,
        params: HashMap<String, String>,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<()>> + Send + '_>> {
        let reject = *self.reject.lock();
        self.calls.lock().push((path.clone(), params));
        Box::pin(async move {
            if reject {
                Err(DispatchError::NavigationFailure {
                    path,
                    message: "unknown route".to_string(),
                })
            } else {
                Ok(())
            }
        })
    }
}

pub struct FakeGateway {
    permission: PermissionResult,
    token: DispatchResult<String>,
    token_calls: Mutex<usize>,
}

impl FakeGateway {
    pub fn new(permission: PermissionResult, token: DispatchResult<String>) -> Self {
        Self {
            permission,
            token,
            token_calls: Mutex::new(0),
        }
    }

    pub fn token_calls(&self) -> usize {
        *self.token_calls.lock()
    }
}

impl PermissionGateway for FakeGateway {
    fn request_permission(
        &self,
    ) -> Pin<Box<dyn Future<Output = DispatchResult<PermissionResult>> + Send + '_>> {
        let permission = self.permission;
        Box::pin(async move { Ok(permission) })
    }

    fn obtain_token(&self) -> Pin<Box<dyn Future<Output = DispatchResult<String>> + Send + '_>> {
        *self.token_calls.lock() += 1;
        let result = self.token.clone();
        Box::pin(async move { result })
    }
}
