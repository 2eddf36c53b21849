use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::{OptionStore, StoreError};

/// In-process option storage. Used by the test harness and by local runs
/// without a database.
#[derive(Default)]
pub struct MemoryOptions {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OptionStore for MemoryOptions {
    async fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::from("option store lock poisoned"))?;
        Ok(entries.get(name).cloned())
    }

    async fn set(&self, name: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::from("option store lock poisoned"))?;
        entries.insert(name.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn get_returns_none_for_missing_name() {
        let store = MemoryOptions::new();
        assert!(store.get("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_overwrites_existing_value() {
        let store = MemoryOptions::new();
        store.set("opt", json!({"a": 1})).await.unwrap();
        store.set("opt", json!({"a": 2})).await.unwrap();
        assert_eq!(store.get("opt").await.unwrap(), Some(json!({"a": 2})));
    }
}
