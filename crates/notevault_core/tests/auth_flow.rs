use notevault_core::{
    Argon2CredentialHasher, AuthError, AuthState, CoreConfig, NoteVault, RequestContext,
    SessionStore, Store, StoreConfig,
};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn vault_with_ttl(ttl: Duration) -> NoteVault {
    NoteVault::from_parts(
        Store::open_in_memory().unwrap(),
        SessionStore::new(ttl),
        Argon2CredentialHasher::with_cost(64, 1, 1).unwrap(),
    )
}

fn vault() -> NoteVault {
    vault_with_ttl(Duration::from_secs(3600))
}

#[test]
fn register_then_login_yields_resolvable_session() {
    let vault = vault();
    let ctx = RequestContext::background();
    let auth = vault.auth();

    let user_id = auth.register(&ctx, "alice", "s3cret").unwrap();
    let token = auth.login(&ctx, "alice", "s3cret").unwrap();

    let identity = auth.authenticate(Some(token.as_str())).unwrap();
    assert_eq!(identity.user_id(), user_id);
    assert_eq!(identity.username(), "alice");
}

#[test]
fn registering_same_username_twice_fails_second_time() {
    let vault = vault();
    let ctx = RequestContext::background();
    let auth = vault.auth();

    auth.register(&ctx, "alice", "first").unwrap();
    let err = auth.register(&ctx, "alice", "second").unwrap_err();
    assert!(matches!(err, AuthError::DuplicateUsername));

    // The original credentials still work; the second password does not.
    assert!(auth.login(&ctx, "alice", "first").is_ok());
    assert!(matches!(
        auth.login(&ctx, "alice", "second"),
        Err(AuthError::InvalidCredentials)
    ));
}

#[test]
fn register_rejects_invalid_username() {
    let vault = vault();
    let err = vault
        .auth()
        .register(&RequestContext::background(), "", "pw")
        .unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
}

#[test]
fn unknown_user_and_wrong_password_are_indistinguishable() {
    let vault = vault();
    let ctx = RequestContext::background();
    let auth = vault.auth();
    auth.register(&ctx, "alice", "rightpass").unwrap();

    let wrong_password = auth.login(&ctx, "alice", "wrongpass").unwrap_err();
    let unknown_user = auth.login(&ctx, "nouser", "anything").unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_user, AuthError::InvalidCredentials));
    assert_eq!(format!("{wrong_password:?}"), format!("{unknown_user:?}"));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    assert_eq!(wrong_password.public_message(), unknown_user.public_message());
}

#[test]
fn failed_logins_do_not_create_sessions() {
    let vault = vault();
    let ctx = RequestContext::background();
    let auth = vault.auth();
    auth.register(&ctx, "alice", "rightpass").unwrap();

    let _ = auth.login(&ctx, "alice", "wrongpass");
    let _ = auth.login(&ctx, "ghost", "whatever");
    assert_eq!(vault.sessions().active_count(), 0);
}

#[test]
fn logout_destroys_session_permanently_and_is_idempotent() {
    let vault = vault();
    let ctx = RequestContext::background();
    let auth = vault.auth();
    auth.register(&ctx, "alice", "pw").unwrap();
    let token = auth.login(&ctx, "alice", "pw").unwrap();

    auth.logout(token.as_str());
    auth.logout(token.as_str());
    auth.logout("never-issued");

    for _ in 0..3 {
        assert_eq!(auth.resolve(Some(token.as_str())), AuthState::Unauthenticated);
    }
    assert!(matches!(
        auth.authenticate(Some(token.as_str())),
        Err(AuthError::Unauthorized)
    ));

    // Logging in again issues a different token; the old one stays dead.
    let fresh = auth.login(&ctx, "alice", "pw").unwrap();
    assert_ne!(fresh, token);
    assert_eq!(auth.resolve(Some(token.as_str())), AuthState::Unauthenticated);
    assert!(auth.resolve(Some(fresh.as_str())).is_authenticated());
}

#[test]
fn missing_or_unknown_token_is_unauthorized() {
    let vault = vault();
    let auth = vault.auth();
    assert!(matches!(auth.authenticate(None), Err(AuthError::Unauthorized)));
    assert!(matches!(
        auth.authenticate(Some("0000")),
        Err(AuthError::Unauthorized)
    ));
    assert_eq!(AuthError::Unauthorized.public_message(), "please log in");
}

#[test]
fn expired_session_is_unauthorized() {
    let vault = vault_with_ttl(Duration::ZERO);
    let ctx = RequestContext::background();
    let auth = vault.auth();
    auth.register(&ctx, "alice", "pw").unwrap();
    let token = auth.login(&ctx, "alice", "pw").unwrap();

    assert!(matches!(
        auth.authenticate(Some(token.as_str())),
        Err(AuthError::Unauthorized)
    ));
}

#[test]
fn concurrent_resolve_and_destroy_never_resurrect_a_token() {
    let vault = Arc::new(vault());
    let ctx = RequestContext::background();
    vault.auth().register(&ctx, "alice", "pw").unwrap();
    let token = vault.auth().login(&ctx, "alice", "pw").unwrap();
    let token = token.into_string();

    let mut handles = Vec::new();
    for worker in 0..8 {
        let vault = Arc::clone(&vault);
        let token = token.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..200 {
                if worker % 2 == 0 {
                    vault.sessions().destroy(&token);
                } else {
                    let _ = vault.sessions().resolve(Some(&token));
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        vault.sessions().resolve(Some(&token)),
        AuthState::Unauthenticated
    );
}

#[test]
fn file_backed_vault_bootstraps_from_config_and_shuts_down() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.db");
    let config = CoreConfig {
        store: StoreConfig::File(path.clone()),
        ..CoreConfig::in_memory()
    };
    let ctx = RequestContext::background();

    let vault = NoteVault::bootstrap(&config).unwrap();
    let user_id = vault.auth().register(&ctx, "alice", "pw").unwrap();
    vault.shutdown().unwrap();

    // Accounts survive a restart; sessions do not.
    let vault = NoteVault::bootstrap(&config).unwrap();
    let user = vault.users().get_user_by_username(&ctx, "alice").unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(vault.sessions().active_count(), 0);
    vault.shutdown().unwrap();
}
