//! `PostgreSQL` implementation of the `GroupRegistry` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use teleporter_core::error::DomainError;
use teleporter_core::registry::{GroupRegistry, StoredGroup};
use tracing::debug;
use uuid::Uuid;

use crate::infrastructure;

/// PostgreSQL-backed group registry. One row per `(scene_id, name)`.
#[derive(Debug, Clone)]
pub struct PgGroupRegistry {
    pool: PgPool,
}

impl PgGroupRegistry {
    /// Creates a new `PgGroupRegistry`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRegistry for PgGroupRegistry {
    async fn get(&self, scene_id: Uuid, name: &str) -> Result<Option<StoredGroup>, DomainError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT state FROM region_groups WHERE scene_id = $1 AND name = $2")
                .bind(scene_id)
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| infrastructure(&e))?;

        Ok(row.map(|(state,)| StoredGroup {
            scene_id,
            name: name.to_owned(),
            state,
        }))
    }

    async fn list(&self, scene_id: Uuid) -> Result<Vec<StoredGroup>, DomainError> {
        let rows: Vec<(String, serde_json::Value)> = sqlx::query_as(
            "SELECT name, state FROM region_groups WHERE scene_id = $1 ORDER BY name",
        )
        .bind(scene_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;

        Ok(rows
            .into_iter()
            .map(|(name, state)| StoredGroup {
                scene_id,
                name,
                state,
            })
            .collect())
    }

    async fn set(&self, group: StoredGroup) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO region_groups (scene_id, name, state) VALUES ($1, $2, $3) \
             ON CONFLICT (scene_id, name) \
             DO UPDATE SET state = EXCLUDED.state, updated_at = NOW()",
        )
        .bind(group.scene_id)
        .bind(&group.name)
        .bind(&group.state)
        .execute(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;

        debug!(scene_id = %group.scene_id, group = %group.name, "stored group");
        Ok(())
    }

    async fn unset(&self, scene_id: Uuid, name: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM region_groups WHERE scene_id = $1 AND name = $2")
            .bind(scene_id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(())
    }

    async fn unset_all(&self, scene_id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM region_groups WHERE scene_id = $1")
            .bind(scene_id)
            .execute(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;

        debug!(%scene_id, removed = result.rows_affected(), "cleared groups");
        Ok(())
    }
}
