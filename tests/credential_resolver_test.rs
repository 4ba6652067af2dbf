//! Integration tests for the standard credential chain

use aegis::config::{secret_string, AegisConfig};
use aegis::credentials::{CredentialResolver, LocalStore, SessionStore};
use aegis::domain::CredentialError;
use secrecy::ExposeSecret;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> AegisConfig {
    let mut config = AegisConfig::default();
    config.credentials.store_path = dir
        .path()
        .join("credentials.json")
        .to_string_lossy()
        .to_string();
    // A variable nobody sets, so the environment source is empty unless captured
    config.credentials.api_key_env = "AEGIS_CREDENTIAL_TEST_NEVER_SET".to_string();
    config
}

#[test]
fn test_standard_chain_order() {
    let dir = TempDir::new().unwrap();
    let resolver = CredentialResolver::standard(&config_in(&dir), SessionStore::new());

    assert_eq!(
        resolver.source_names(),
        vec!["environment", "persistent local store", "session store"]
    );
}

#[test]
fn test_captured_environment_value_wins() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir);
    config.credentials.api_key = Some(secret_string("from-env".to_string()));

    LocalStore::new(&config.credentials.store_path)
        .set(&config.credentials.store_key, &secret_string("from-store".to_string()))
        .unwrap();

    let credential = CredentialResolver::standard(&config, SessionStore::new())
        .resolve()
        .unwrap();
    assert_eq!(credential.source(), "environment");
    assert_eq!(credential.secret().expose_secret(), "from-env");
}

#[test]
fn test_empty_captured_value_falls_through_to_local_store() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(&dir);
    config.credentials.api_key = Some(secret_string(String::new()));

    LocalStore::new(&config.credentials.store_path)
        .set(&config.credentials.store_key, &secret_string("from-store".to_string()))
        .unwrap();

    let session = SessionStore::new();
    session.set(&config.credentials.store_key, "from-session");

    let credential = CredentialResolver::standard(&config, session).resolve().unwrap();
    assert_eq!(credential.source(), "persistent local store");
    assert_eq!(credential.secret().expose_secret(), "from-store");
}

#[test]
fn test_session_store_is_last_resort() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let session = SessionStore::new();
    session.set(&config.credentials.store_key, "from-session");

    let credential = CredentialResolver::standard(&config, session).resolve().unwrap();
    assert_eq!(credential.source(), "session store");
}

#[test]
fn test_nothing_configured_lists_every_source() {
    let dir = TempDir::new().unwrap();
    let err = CredentialResolver::standard(&config_in(&dir), SessionStore::new())
        .resolve()
        .unwrap_err();

    match err {
        CredentialError::CredentialUnavailable { sources } => {
            assert_eq!(sources.len(), 3);
            assert_eq!(sources[0], "environment");
        }
        other => panic!("Expected CredentialUnavailable, got {other:?}"),
    }
}

#[test]
fn test_unreadable_local_store_is_skipped() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    std::fs::write(&config.credentials.store_path, "not json").unwrap();

    let session = SessionStore::new();
    session.set(&config.credentials.store_key, "from-session");

    let credential = CredentialResolver::standard(&config, session).resolve().unwrap();
    assert_eq!(credential.source(), "session store");
}

#[test]
fn test_store_written_after_failure_is_picked_up() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let resolver = CredentialResolver::standard(&config, SessionStore::new());

    assert!(resolver.resolve().is_err());

    let store = LocalStore::new(&config.credentials.store_path);
    store
        .set(&config.credentials.store_key, &secret_string("saved-later".to_string()))
        .unwrap();
    assert_eq!(resolver.resolve().unwrap().source(), "persistent local store");

    assert!(store.clear(&config.credentials.store_key).unwrap());
    assert!(resolver.resolve().is_err());
}

#[cfg(unix)]
#[test]
fn test_local_store_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("credentials.json");
    LocalStore::new(&path)
        .set("AGENT_2_API_KEY", &secret_string("sk-test".to_string()))
        .unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
