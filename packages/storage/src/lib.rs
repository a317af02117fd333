// ABOUTME: Data layer for named configuration objects
// ABOUTME: Store trait, storage errors, and the SQLite and in-memory backends

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

pub mod config;
pub mod memory;
pub mod sqlite;

pub use config::{ConfigFactory, ConfigObject};
pub use memory::MemoryConfigStore;
pub use sqlite::SqliteConfigStore;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to save configuration {name}: {reason}")]
    Write { name: String, reason: String },
    #[error("Stored configuration {0} is not a key/value object")]
    InvalidData(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Key/value payload of a configuration object
pub type ConfigData = Map<String, Value>;

const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 30;

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: PathBuf,
    pub enable_wal: bool,
    pub max_connections: u32,
    pub busy_timeout_seconds: u64,
}

impl From<&social_auth_config::Config> for StorageConfig {
    fn from(config: &social_auth_config::Config) -> Self {
        Self {
            path: config.database_path.clone(),
            enable_wal: config.enable_wal,
            max_connections: config.max_connections,
            busy_timeout_seconds: DEFAULT_BUSY_TIMEOUT_SECS,
        }
    }
}

/// Backend that persists whole configuration objects by name.
///
/// `save` replaces the stored object in a single write; readers observe either
/// the previous object or the new one. Concurrent saves are last-write-wins.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the object stored under `name`, or `None` if it was never saved.
    async fn load(&self, name: &str) -> StorageResult<Option<ConfigData>>;

    /// Replace the object stored under `name`.
    async fn save(&self, name: &str, data: &ConfigData) -> StorageResult<()>;
}
