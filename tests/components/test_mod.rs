//! Tests for components/mod.rs

use push_dispatch::components::{
    DispatchError, DispatchId, NavigationIntent, PermissionResult,
};

#[test]
fn permission_result_gates_token_acquisition() {
    assert!(PermissionResult::Granted.allows_token());
    assert!(PermissionResult::Provisional.allows_token());
    assert!(!PermissionResult::Denied.allows_token());
}

#[test]
fn dispatch_id_displays_as_uuid() {
    let id = DispatchId::generate();
    assert_eq!(id.to_string(), id.as_uuid().to_string());
    assert_eq!(DispatchId::from_uuid(id.as_uuid()), id);
}

#[test]
fn navigation_intent_builder_collects_params() {
    let intent = NavigationIntent::new("/deal/42")
        .with_param("amount", "100")
        .with_param("currency", "USD");

    assert_eq!(intent.target_path, "/deal/42");
    assert_eq!(intent.params.len(), 2);
    assert_eq!(intent.params.get("amount"), Some(&"100".to_string()));
}

#[test]
fn errors_carry_their_context_in_the_message() {
    let storage = DispatchError::StorageFailure {
        operation: "read",
        key: "push_dispatch.pending_intent".to_string(),
        message: "disk full".to_string(),
    };
    assert!(storage.to_string().contains("read"));
    assert!(storage.to_string().contains("pending_intent"));

    let navigation = DispatchError::NavigationFailure {
        path: "/unknown".to_string(),
        message: "no such route".to_string(),
    };
    assert!(navigation.to_string().contains("/unknown"));
}
