// ABOUTME: Integration tests for the SQLite config store
// ABOUTME: Persistence across reopen, whole-object replacement, and corrupt rows

use pretty_assertions::assert_eq;
use serde_json::json;
use social_auth_storage::{
    ConfigData, ConfigFactory, ConfigStore, SqliteConfigStore, StorageConfig, StorageError,
};
use std::sync::Arc;
use tempfile::TempDir;

fn test_config(dir: &TempDir) -> StorageConfig {
    StorageConfig {
        path: dir.path().join("nested").join("config.db"),
        enable_wal: true,
        max_connections: 1,
        busy_timeout_seconds: 5,
    }
}

fn object(value: serde_json::Value) -> ConfigData {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[tokio::test]
async fn test_load_missing_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = SqliteConfigStore::new(&test_config(&dir)).await.unwrap();

    assert!(store.load("social_auth_facebook.settings").await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_and_reopen() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let data = object(json!({
        "app_id": "123",
        "disabled_roles": ["editor"],
        "redirect_user_form": true
    }));

    {
        let store = SqliteConfigStore::new(&config).await.unwrap();
        store.save("social_auth_facebook.settings", &data).await.unwrap();
        store.pool().close().await;
    }

    let store = SqliteConfigStore::new(&config).await.unwrap();
    let loaded = store.load("social_auth_facebook.settings").await.unwrap();
    assert_eq!(loaded, Some(data));
}

#[tokio::test]
async fn test_save_replaces_whole_object() {
    let dir = TempDir::new().unwrap();
    let store = SqliteConfigStore::new(&test_config(&dir)).await.unwrap();

    store
        .save("module.settings", &object(json!({"a": 1, "b": 2})))
        .await
        .unwrap();
    store
        .save("module.settings", &object(json!({"a": 3})))
        .await
        .unwrap();

    let loaded = store.load("module.settings").await.unwrap().unwrap();
    assert_eq!(loaded, object(json!({"a": 3})));
}

#[tokio::test]
async fn test_names_are_isolated() {
    let dir = TempDir::new().unwrap();
    let store = SqliteConfigStore::new(&test_config(&dir)).await.unwrap();

    store
        .save("first.settings", &object(json!({"value": "first"})))
        .await
        .unwrap();

    assert!(store.load("second.settings").await.unwrap().is_none());
}

#[tokio::test]
async fn test_non_object_row_is_invalid() {
    let dir = TempDir::new().unwrap();
    let store = SqliteConfigStore::new(&test_config(&dir)).await.unwrap();

    sqlx::query("INSERT INTO config (name, data) VALUES (?, ?)")
        .bind("broken.settings")
        .bind("[1, 2, 3]")
        .execute(store.pool())
        .await
        .unwrap();

    let result = store.load("broken.settings").await;
    assert!(matches!(result, Err(StorageError::InvalidData(name)) if name == "broken.settings"));
}

#[tokio::test]
async fn test_factory_over_sqlite() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(SqliteConfigStore::new(&test_config(&dir)).await.unwrap());
    let factory = ConfigFactory::new(store);

    let mut config = factory.get_editable("module.settings").await.unwrap();
    config.set("graph_version", "2.8").set("disable_admin_login", false);
    config.save().await.unwrap();

    let reloaded = factory.get_editable("module.settings").await.unwrap();
    assert!(!reloaded.is_new());
    assert_eq!(reloaded.get("graph_version"), Some(&json!("2.8")));
    assert_eq!(reloaded.get("disable_admin_login"), Some(&json!(false)));
}
