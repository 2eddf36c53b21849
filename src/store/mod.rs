pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug)]
pub struct StoreError {
    pub message: String,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        StoreError { message: s }
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        StoreError {
            message: s.to_string(),
        }
    }
}

/// Named key-value configuration storage, the persistence seam the host
/// platform provides. A missing record is not an error.
#[async_trait]
pub trait OptionStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<Value>, StoreError>;
    async fn set(&self, name: &str, value: Value) -> Result<(), StoreError>;
}
