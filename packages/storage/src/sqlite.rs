use async_trait::async_trait;
use serde_json::Value;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, error, info};

use crate::{ConfigData, ConfigStore, StorageConfig, StorageError, StorageResult};

/// SQLite implementation of ConfigStore
pub struct SqliteConfigStore {
    pool: SqlitePool,
}

impl SqliteConfigStore {
    /// Open (creating if needed) the database described by `config` and run migrations
    pub async fn new(config: &StorageConfig) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = config.path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        let database_url = format!("sqlite:{}", config.path.display());

        if !sqlx::Sqlite::database_exists(&database_url)
            .await
            .map_err(StorageError::Sqlx)?
        {
            debug!("Creating database at: {}", database_url);
            sqlx::Sqlite::create_database(&database_url)
                .await
                .map_err(StorageError::Sqlx)?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.busy_timeout_seconds))
            .connect(&database_url)
            .await
            .map_err(StorageError::Sqlx)?;

        if config.enable_wal {
            sqlx::query("PRAGMA journal_mode = WAL")
                .execute(&pool)
                .await
                .map_err(StorageError::Sqlx)?;
        }

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let store = Self::from_pool(pool);
        store.initialize().await?;
        Ok(store)
    }

    /// Wrap an existing pool. Call [`SqliteConfigStore::initialize`] before use
    /// unless the schema is already in place.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn initialize(&self) -> StorageResult<()> {
        info!("Initializing SQLite config store with migrations");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(StorageError::Migration)?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ConfigStore for SqliteConfigStore {
    async fn load(&self, name: &str) -> StorageResult<Option<ConfigData>> {
        let row = sqlx::query("SELECT data FROM config WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row.try_get("data").map_err(StorageError::Sqlx)?;
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(data) => Ok(Some(data)),
            _ => Err(StorageError::InvalidData(name.to_string())),
        }
    }

    async fn save(&self, name: &str, data: &ConfigData) -> StorageResult<()> {
        let json = serde_json::to_string(data)?;

        // Single upsert so the object is replaced as a whole
        sqlx::query(
            r#"
            INSERT INTO config (name, data)
            VALUES (?, ?)
            ON CONFLICT(name) DO UPDATE SET
                data = excluded.data,
                updated_at = datetime('now', 'utc')
            "#,
        )
        .bind(name)
        .bind(&json)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to save configuration {}: {}", name, e);
            StorageError::Write {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!("Persisted configuration {}", name);
        Ok(())
    }
}
