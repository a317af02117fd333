// ABOUTME: In-memory configuration store
// ABOUTME: Process-local backend for embedding and tests

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::{ConfigData, ConfigStore, StorageResult};

#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    objects: RwLock<HashMap<String, ConfigData>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn load(&self, name: &str) -> StorageResult<Option<ConfigData>> {
        Ok(self.objects.read().await.get(name).cloned())
    }

    async fn save(&self, name: &str, data: &ConfigData) -> StorageResult<()> {
        self.objects
            .write()
            .await
            .insert(name.to_string(), data.clone());
        Ok(())
    }
}
