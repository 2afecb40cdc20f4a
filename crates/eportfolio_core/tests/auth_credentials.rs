use eportfolio_core::auth::hash_password;
use eportfolio_core::db::open_db_in_memory;
use eportfolio_core::repo::user_repo::{SqliteUserRepo, UserRepository};
use eportfolio_core::{AuthError, Credential, CredentialVerifier};

#[test]
fn login_with_stored_credential_issues_verifiable_token() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepo::try_new(&conn).unwrap();
    users
        .upsert(&Credential {
            username: "John Shepard".to_string(),
            password_hash: hash_password("normandy"),
        })
        .unwrap();

    let verifier = CredentialVerifier::new("integration secret", 3600);
    let token = verifier.login(&users, "John Shepard", "normandy").unwrap();

    assert_eq!(verifier.verify(&token).unwrap(), "John Shepard");
}

#[test]
fn unknown_user_and_wrong_password_fail_identically() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepo::try_new(&conn).unwrap();
    users
        .upsert(&Credential {
            username: "shepard".to_string(),
            password_hash: hash_password("normandy"),
        })
        .unwrap();

    let verifier = CredentialVerifier::new("integration secret", 3600);

    let unknown = verifier.login(&users, "garrus", "normandy").unwrap_err();
    let wrong = verifier.login(&users, "shepard", "citadel").unwrap_err();
    assert!(matches!(unknown, AuthError::InvalidCredentials));
    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[test]
fn verify_rejects_garbage_tokens() {
    let verifier = CredentialVerifier::new("integration secret", 3600);
    assert!(matches!(
        verifier.verify("not a token"),
        Err(AuthError::Unauthenticated)
    ));
}

#[test]
fn upsert_replaces_existing_credential() {
    let conn = open_db_in_memory().unwrap();
    let users = SqliteUserRepo::try_new(&conn).unwrap();

    users
        .upsert(&Credential {
            username: "shepard".to_string(),
            password_hash: hash_password("old"),
        })
        .unwrap();
    users
        .upsert(&Credential {
            username: "shepard".to_string(),
            password_hash: hash_password("new"),
        })
        .unwrap();

    let stored = users.find_by_username("shepard").unwrap().unwrap();
    assert_eq!(stored.password_hash, hash_password("new"));
    assert!(users.find_by_username("garrus").unwrap().is_none());
}
