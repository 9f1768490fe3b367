mod common;

use chrono::Duration;
use common::TestAuth;
use identity_service::domain::auth::errors::AuthError;
use identity_service::domain::auth::ports::AuthServicePort;
use identity_service::domain::user::models::EmailAddress;
use identity_service::domain::user::models::RegisterUserCommand;
use identity_service::domain::user::models::Role;
use identity_service::domain::user::models::Username;

fn flip_char(token: &str, index: usize) -> String {
    let mut chars: Vec<char> = token.chars().collect();
    chars[index] = if chars[index] == 'A' { 'B' } else { 'A' };
    chars.into_iter().collect()
}

#[tokio::test]
async fn test_full_account_lifecycle() {
    let app = TestAuth::new();

    // Register
    let profile = app
        .register("alice", "a@example.com", "Secret123!")
        .await;
    assert_eq!(profile.username.as_str(), "alice");
    assert_eq!(profile.role, Role::User);

    // Wrong password first
    let result = app.service.authenticate("alice", "WrongPass!").await;
    assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));

    // Correct login yields a token pair and a registered session
    let session = app
        .service
        .authenticate("alice", "Secret123!")
        .await
        .expect("login failed");
    assert!(!session.access_token.is_empty());
    assert!(!session.refresh_token.is_empty());
    assert_eq!(app.service.sessions().active_count(&profile.id).await, 1);

    // Refresh mints a new access token; the refresh token stays valid
    let access = app
        .service
        .refresh(&session.refresh_token)
        .await
        .expect("refresh failed");
    assert!(!access.is_empty());
    assert_eq!(app.service.sessions().active_count(&profile.id).await, 1);

    // Password change empties the registry
    app.service
        .change_password(&profile.id, "Secret123!", "NewPass456!")
        .await
        .expect("change_password failed");
    assert_eq!(app.service.sessions().active_count(&profile.id).await, 0);

    // The old refresh token is authentic but no longer registered
    let result = app.service.refresh(&session.refresh_token).await;
    assert!(matches!(result.unwrap_err(), AuthError::TokenNotRegistered));

    // The new password works, the old one does not
    let result = app.service.authenticate("alice", "Secret123!").await;
    assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    app.service
        .authenticate("alice", "NewPass456!")
        .await
        .expect("login with new password failed");
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
    let app = TestAuth::new();
    app.register("alice", "a@example.com", "Secret123!").await;

    let command = RegisterUserCommand::new(
        Username::new("alice".to_string()).unwrap(),
        EmailAddress::new("other@example.com".to_string()).unwrap(),
        "Secret123!".to_string(),
    );
    let result = app.service.register(command).await;
    assert!(matches!(
        result.unwrap_err(),
        AuthError::UsernameAlreadyExists(_)
    ));

    let command = RegisterUserCommand::new(
        Username::new("bob".to_string()).unwrap(),
        EmailAddress::new("a@example.com".to_string()).unwrap(),
        "Secret123!".to_string(),
    );
    let result = app.service.register(command).await;
    assert!(matches!(
        result.unwrap_err(),
        AuthError::EmailAlreadyExists(_)
    ));
}

#[tokio::test]
async fn test_unknown_user_looks_like_wrong_password() {
    let app = TestAuth::new();
    app.register("realuser", "real@example.com", "Secret123!")
        .await;

    let unknown = app
        .service
        .authenticate("nonexistent", "anypassword")
        .await
        .unwrap_err();
    let wrong = app
        .service
        .authenticate("realuser", "wrongpassword")
        .await
        .unwrap_err();

    // Same kind, same message: nothing for an enumeration probe to read.
    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let app = TestAuth::new();
    let profile = app.register("alice", "a@example.com", "Secret123!").await;

    let session = app
        .service
        .authenticate("alice", "Secret123!")
        .await
        .expect("login failed");

    app.service
        .logout(&session.refresh_token)
        .await
        .expect("logout failed");
    assert_eq!(app.service.sessions().active_count(&profile.id).await, 0);

    let result = app.service.refresh(&session.refresh_token).await;
    assert!(matches!(result.unwrap_err(), AuthError::TokenNotRegistered));

    // Logout is idempotent, even for damaged input.
    app.service
        .logout(&session.refresh_token)
        .await
        .expect("repeat logout failed");
    app.service
        .logout(&flip_char(&session.refresh_token, 4))
        .await
        .expect("logout of tampered token failed");
}

#[tokio::test]
async fn test_tampered_refresh_token_is_rejected() {
    let app = TestAuth::new();
    app.register("alice", "a@example.com", "Secret123!").await;

    let session = app
        .service
        .authenticate("alice", "Secret123!")
        .await
        .expect("login failed");

    let mangled = flip_char(&session.refresh_token, session.refresh_token.len() / 2);
    let result = app.service.refresh(&mangled).await;
    assert!(matches!(result.unwrap_err(), AuthError::TokenTampered));

    // The genuine token is unaffected.
    app.service
        .refresh(&session.refresh_token)
        .await
        .expect("refresh failed");
}

#[tokio::test]
async fn test_expired_refresh_token() {
    // Refresh tokens are born expired under a negative TTL.
    let app = TestAuth::with_ttls(Duration::minutes(15), Duration::seconds(-60));
    let profile = app.register("alice", "a@example.com", "Secret123!").await;

    let session = app
        .service
        .authenticate("alice", "Secret123!")
        .await
        .expect("login failed");

    let result = app.service.refresh(&session.refresh_token).await;
    assert!(matches!(result.unwrap_err(), AuthError::TokenExpired));

    // The lazy sweep dropped the stale record, and logging out an expired
    // token still reads as success.
    assert_eq!(app.service.sessions().active_count(&profile.id).await, 0);
    app.service
        .logout(&session.refresh_token)
        .await
        .expect("logout of expired token failed");
}

#[tokio::test]
async fn test_concurrent_logins_all_survive() {
    let app = TestAuth::new();
    let profile = app.register("alice", "a@example.com", "Secret123!").await;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = app.service.clone();
        handles.push(tokio::spawn(async move {
            service
                .authenticate("alice", "Secret123!")
                .await
                .expect("concurrent login failed")
        }));
    }

    let mut sessions = Vec::new();
    for handle in handles {
        sessions.push(handle.await.expect("login task panicked"));
    }

    assert_eq!(app.service.sessions().active_count(&profile.id).await, 4);
    for session in &sessions {
        app.service
            .refresh(&session.refresh_token)
            .await
            .expect("refresh of a concurrent session failed");
    }

    // One password change fells them all.
    app.service
        .change_password(&profile.id, "Secret123!", "NewPass456!")
        .await
        .expect("change_password failed");
    for session in &sessions {
        let result = app.service.refresh(&session.refresh_token).await;
        assert!(matches!(result.unwrap_err(), AuthError::TokenNotRegistered));
    }
}
