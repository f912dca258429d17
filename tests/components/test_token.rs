//! Tests for components/token.rs

use std::sync::Arc;

use push_dispatch::backends::MemoryStore;
use push_dispatch::components::token::{DEVICE_TOKEN_KEY, TokenManager};
use push_dispatch::components::{
    DispatchError, KeyValueBackend, PermissionGateway, PermissionResult,
};

use super::fakes::FakeGateway;

fn manager(
    gateway: FakeGateway,
) -> (Arc<FakeGateway>, Arc<MemoryStore>, TokenManager) {
    let gateway = Arc::new(gateway);
    let storage = Arc::new(MemoryStore::new());
    let manager = TokenManager::new(
        gateway.clone() as Arc<dyn PermissionGateway>,
        storage.clone() as Arc<dyn KeyValueBackend>,
    );
    (gateway, storage, manager)
}

#[tokio::test]
async fn denied_permission_skips_token_acquisition() {
    let (gateway, storage, manager) = manager(FakeGateway::new(
        PermissionResult::Denied,
        Ok("unreachable".to_string()),
    ));

    assert_eq!(manager.register().await, PermissionResult::Denied);
    assert_eq!(gateway.token_calls(), 0);
    assert!(storage.snapshot().is_empty());
    assert_eq!(manager.token().await, None);
}

#[tokio::test]
async fn granted_permission_persists_the_token() {
    let (gateway, storage, manager) = manager(FakeGateway::new(
        PermissionResult::Granted,
        Ok("fcm-token-123".to_string()),
    ));

    assert_eq!(manager.register().await, PermissionResult::Granted);
    assert_eq!(gateway.token_calls(), 1);
    assert_eq!(
        storage.snapshot().get(DEVICE_TOKEN_KEY),
        Some(&"fcm-token-123".to_string())
    );
    assert_eq!(manager.token().await, Some("fcm-token-123".to_string()));
    assert_eq!(manager.current().unwrap().value, "fcm-token-123");
}

#[tokio::test]
async fn provisional_permission_also_acquires_a_token() {
    let (gateway, _, manager) = manager(FakeGateway::new(
        PermissionResult::Provisional,
        Ok("prov-token".to_string()),
    ));

    assert_eq!(manager.register().await, PermissionResult::Provisional);
    assert_eq!(gateway.token_calls(), 1);
}

#[tokio::test]
async fn token_unavailable_is_swallowed() {
    let (gateway, storage, manager) = manager(FakeGateway::new(
        PermissionResult::Granted,
        Err(DispatchError::TokenUnavailable {
            reason: "no network".to_string(),
        }),
    ));

    // The failure is logged, not raised; permission is still reported.
    assert_eq!(manager.register().await, PermissionResult::Granted);
    assert_eq!(gateway.token_calls(), 1);
    assert!(storage.snapshot().is_empty());
    assert_eq!(manager.token().await, None);
    assert!(manager.current().is_none());
}

#[tokio::test]
async fn token_falls_back_to_the_persisted_copy() {
    let storage = Arc::new(MemoryStore::new());
    storage
        .persist(DEVICE_TOKEN_KEY.to_string(), "from-last-run".to_string())
        .await
        .unwrap();

    let gateway = Arc::new(FakeGateway::new(
        PermissionResult::Denied,
        Ok("unreachable".to_string()),
    ));
    let manager = TokenManager::new(
        gateway as Arc<dyn PermissionGateway>,
        storage as Arc<dyn KeyValueBackend>,
    );

    assert_eq!(manager.token().await, Some("from-last-run".to_string()));
    // Only this run's acquisition populates the in-memory record.
    assert!(manager.current().is_none());
}
