#![allow(clippy::unwrap_used, clippy::expect_used)]

use cartbot_core::Location;
use cartbot_session::{FileStore, KeyValueStore, Session, SessionStore};
use std::sync::Arc;

/// Helper: create a FileStore in a temp directory.
async fn temp_store() -> (FileStore, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::new(tmp.path().join("sessions")).await.unwrap();
    (store, tmp)
}

#[tokio::test]
async fn test_set_and_get() {
    let (store, _tmp) = temp_store().await;
    store.set("viewing_store_u1", "11150").await.unwrap();
    assert_eq!(
        store.get("viewing_store_u1").await.unwrap().as_deref(),
        Some("11150")
    );
}

#[tokio::test]
async fn test_get_nonexistent_returns_none() {
    let (store, _tmp) = temp_store().await;
    assert!(store.get("location_nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_overwrite_replaces_value() {
    let (store, _tmp) = temp_store().await;
    store.set("login_u1", "first").await.unwrap();
    store.set("login_u1", "second").await.unwrap();
    assert_eq!(store.get("login_u1").await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn test_no_temp_files_left_behind() {
    let (store, tmp) = temp_store().await;
    store.set("login_u1", "code").await.unwrap();

    let mut entries = tokio::fs::read_dir(tmp.path().join("sessions")).await.unwrap();
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await.unwrap() {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    assert_eq!(names, vec!["login_u1".to_string()]);
}

#[tokio::test]
async fn test_persistence_across_store_instances() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("sessions");

    {
        let store = FileStore::new(dir.clone()).await.unwrap();
        store.set("viewing_store_u1", "11150").await.unwrap();
    }

    let store = FileStore::new(dir).await.unwrap();
    assert_eq!(
        store.get("viewing_store_u1").await.unwrap().as_deref(),
        Some("11150")
    );
}

#[tokio::test]
async fn test_location_round_trip_is_exact() {
    let (store, _tmp) = temp_store().await;
    let sessions = SessionStore::new(Arc::new(store));
    let location = Location::new(25.047571, 121.577812);

    sessions.save_location("u1", &location).await.unwrap();
    let loaded = sessions.location("u1").await.unwrap();

    assert_eq!(loaded.latitude, 25.047571);
    assert_eq!(loaded.longitude, 121.577812);
}

#[tokio::test]
async fn test_full_session_load() {
    let (store, _tmp) = temp_store().await;
    let sessions = SessionStore::new(Arc::new(store));

    sessions.save_viewing_store("u1", "11150").await.unwrap();
    sessions
        .save_location("u1", &Location::new(14.5367633, 121.009545))
        .await
        .unwrap();
    sessions.save_auth_token("u1", "auth-code").await.unwrap();

    let session = sessions.load("u1").await;
    assert_eq!(
        session,
        Session {
            viewing_store_id: Some("11150".into()),
            location: Some(Location::new(14.5367633, 121.009545)),
            auth_token: Some("auth-code".into()),
        }
    );

    // Another sender shares nothing.
    assert_eq!(sessions.load("u2").await, Session::default());
}
