use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::{OptionStore, StoreError};

pub struct PgOptions {
    pool: PgPool,
}

impl PgOptions {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError {
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl OptionStore for PgOptions {
    async fn get(&self, name: &str) -> Result<Option<Value>, StoreError> {
        let value = sqlx::query_scalar::<_, Value>("SELECT value FROM options WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, name: &str, value: Value) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO options (name, value) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET
               value = EXCLUDED.value,
               updated_at = now()",
        )
        .bind(name)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
