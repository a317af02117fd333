// ABOUTME: Editable configuration objects backed by a ConfigStore
// ABOUTME: Get/set by key with a single atomic save of the whole object

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::{ConfigData, ConfigStore, StorageResult};

/// Opens configuration objects from a shared store
#[derive(Clone)]
pub struct ConfigFactory {
    store: Arc<dyn ConfigStore>,
}

impl ConfigFactory {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Load an editable copy of the object stored under `name`.
    /// A name that was never saved yields an empty object.
    pub async fn get_editable(&self, name: &str) -> StorageResult<ConfigObject> {
        let stored = self.store.load(name).await?;
        let is_new = stored.is_none();
        debug!("Opened configuration {} (new: {})", name, is_new);

        Ok(ConfigObject {
            name: name.to_string(),
            data: stored.unwrap_or_default(),
            is_new,
            store: Arc::clone(&self.store),
        })
    }
}

/// A named configuration object. Changes stay local until [`ConfigObject::save`].
pub struct ConfigObject {
    name: String,
    data: ConfigData,
    is_new: bool,
    store: Arc<dyn ConfigStore>,
}

impl ConfigObject {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True until the object has been saved at least once
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Typed read; `Ok(None)` when the key is absent or null.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.data.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn data(&self) -> &ConfigData {
        &self.data
    }

    pub async fn save(&mut self) -> StorageResult<()> {
        self.store.save(&self.name, &self.data).await?;
        self.is_new = false;
        debug!("Saved configuration {} ({} keys)", self.name, self.data.len());
        Ok(())
    }
}

impl std::fmt::Debug for ConfigObject {
    // Values may hold secrets
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigObject")
            .field("name", &self.name)
            .field("keys", &self.data.keys().collect::<Vec<_>>())
            .field("is_new", &self.is_new)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryConfigStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_editable_missing_is_empty() {
        let factory = ConfigFactory::new(Arc::new(MemoryConfigStore::new()));
        let config = factory.get_editable("module.settings").await.unwrap();

        assert!(config.is_new());
        assert!(config.data().is_empty());
        assert!(config.get("anything").is_none());
    }

    #[tokio::test]
    async fn test_set_is_local_until_save() {
        let store = Arc::new(MemoryConfigStore::new());
        let factory = ConfigFactory::new(store.clone());

        let mut config = factory.get_editable("module.settings").await.unwrap();
        config.set("enabled", true).set("name", "first");

        assert!(store.load("module.settings").await.unwrap().is_none());

        config.save().await.unwrap();
        assert!(!config.is_new());

        let reloaded = factory.get_editable("module.settings").await.unwrap();
        assert_eq!(reloaded.get("enabled"), Some(&json!(true)));
        assert_eq!(reloaded.get("name"), Some(&json!("first")));
    }

    #[tokio::test]
    async fn test_get_as_typed() {
        let factory = ConfigFactory::new(Arc::new(MemoryConfigStore::new()));
        let mut config = factory.get_editable("module.settings").await.unwrap();
        config
            .set("roles", json!(["editor", "author"]))
            .set("nothing", Value::Null);

        let roles: Option<Vec<String>> = config.get_as("roles").unwrap();
        assert_eq!(roles, Some(vec!["editor".to_string(), "author".to_string()]));

        let nothing: Option<String> = config.get_as("nothing").unwrap();
        assert!(nothing.is_none());

        let wrong: StorageResult<Option<bool>> = config.get_as("roles");
        assert!(wrong.is_err());
    }
}
