//! Tests for registration and authentication.

use crate::helpers::*;

#[tokio::test]
async fn test_register_stores_hash_not_plaintext() {
    let store = memory_store();
    let credentials = credential_service(&store);

    let credential = credentials.register("alice", "password123").await.unwrap();

    assert_eq!(credential.username, "alice");
    assert_ne!(credential.password_hash, "password123");
    assert!(!credential.password_hash.contains("password123"));

    // The stored record carries the hash, not the plaintext
    let stored = store.find_credential("alice").await.unwrap().unwrap();
    assert_eq!(stored.password_hash, credential.password_hash);
}

#[tokio::test]
async fn test_register_duplicate_username_fails() {
    let store = memory_store();
    let credentials = credential_service(&store);

    credentials.register("alice", "password123").await.unwrap();
    let err = credentials
        .register("alice", "otherpassword")
        .await
        .unwrap_err();

    assert!(err.is_duplicate_username());
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let store = memory_store();
    let credentials = credential_service(&store);

    // 9 characters, minimum is 10
    let err = credentials.register("alice", "short-pwd").await.unwrap_err();
    assert!(err.is_validation_error());

    // Nothing persisted
    assert!(store.find_credential("alice").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_rejects_blank_username() {
    let store = memory_store();
    let credentials = credential_service(&store);

    let err = credentials.register("   ", "password123").await.unwrap_err();
    assert!(err.is_validation_error());
}

#[tokio::test]
async fn test_register_trims_username() {
    let store = memory_store();
    let credentials = credential_service(&store);

    let credential = credentials
        .register("  alice  ", "password123")
        .await
        .unwrap();

    assert_eq!(credential.username, "alice");
    assert!(store.find_credential("alice").await.unwrap().is_some());
}

#[tokio::test]
async fn test_authenticate_success() {
    let store = memory_store();
    let credentials = credential_service(&store);

    credentials.register("alice", "password123").await.unwrap();
    let identity = credentials
        .authenticate("alice", "password123")
        .await
        .unwrap();

    assert_eq!(identity, "alice");
}

#[tokio::test]
async fn test_authenticate_same_error_for_unknown_user_and_wrong_password() {
    let store = memory_store();
    let credentials = credential_service(&store);

    credentials.register("alice", "password123").await.unwrap();

    let unknown_user = credentials
        .authenticate("mallory", "password123")
        .await
        .unwrap_err();
    let wrong_password = credentials
        .authenticate("alice", "wrong-password")
        .await
        .unwrap_err();

    // Same undifferentiated error kind for both failure modes
    assert!(unknown_user.is_invalid_credentials());
    assert!(wrong_password.is_invalid_credentials());
    assert_eq!(unknown_user.to_string(), wrong_password.to_string());
}

#[tokio::test]
async fn test_custom_minimum_password_length() {
    let store = memory_store();
    let credentials =
        snipboard::credential::CredentialService::with_min_password_len(store.clone(), 4);

    assert_eq!(credentials.min_password_len(), 4);
    assert!(credentials.register("alice", "tiny").await.is_ok());
    assert!(credentials.register("bob", "ugh").await.is_err());
}
