//! `PostgreSQL` implementation of the `SceneStore` trait.
//!
//! Scenes, regions, and entities are plain rows. An entity's containing
//! region is the `region_id` column; it changes only when a positional write
//! names a destination region.

use async_trait::async_trait;
use sqlx::PgPool;
use teleporter_core::document::{DocumentKind, ResolvedDocument};
use teleporter_core::error::DomainError;
use teleporter_core::geometry::Point;
use teleporter_core::scene::{EntityRef, RegionRef, SceneStore, UpdateOptions};
use uuid::Uuid;

use crate::infrastructure;

type RegionRow = (Uuid, Uuid, String, f64, f64);
type EntityRow = (Uuid, Uuid, String, f64, f64, f64, Vec<Uuid>);

const SELECT_REGION: &str =
    "SELECT region_id, scene_id, name, origin_x, origin_y FROM regions WHERE region_id = $1";

const SELECT_ENTITY: &str = "SELECT entity_id, scene_id, name, x, y, elevation, owners \
                             FROM entities WHERE entity_id = $1";

const SELECT_ENTITIES_IN_REGION: &str = "SELECT entity_id, scene_id, name, x, y, elevation, owners \
                                         FROM entities WHERE region_id = $1 ORDER BY name, entity_id";

const RESOLVE: &str = "SELECT 'region'::text, scene_id FROM regions WHERE region_id = $1 \
                       UNION ALL SELECT 'entity'::text, scene_id FROM entities WHERE entity_id = $1 \
                       UNION ALL SELECT 'scene'::text, scene_id FROM scenes WHERE scene_id = $1 \
                       LIMIT 1";

fn region_from_row((id, scene_id, name, x, y): RegionRow) -> RegionRef {
    RegionRef {
        id,
        scene_id,
        name,
        origin: Point::new(x, y),
    }
}

fn entity_from_row((id, scene_id, name, x, y, elevation, owners): EntityRow) -> EntityRef {
    EntityRef {
        id,
        scene_id,
        name,
        position: Point::new(x, y),
        elevation,
        owners,
    }
}

/// PostgreSQL-backed scene store.
#[derive(Debug, Clone)]
pub struct PgSceneStore {
    pool: PgPool,
}

impl PgSceneStore {
    /// Creates a new `PgSceneStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SceneStore for PgSceneStore {
    async fn resolve(&self, id: Uuid) -> Result<Option<ResolvedDocument>, DomainError> {
        let row: Option<(String, Uuid)> = sqlx::query_as(RESOLVE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;

        let Some((kind, scene_id)) = row else {
            return Ok(None);
        };
        let kind = match kind.as_str() {
            "region" => DocumentKind::Region,
            "entity" => DocumentKind::Entity,
            "scene" => DocumentKind::Scene,
            other => {
                return Err(DomainError::Infrastructure(format!(
                    "unexpected document kind {other}"
                )));
            }
        };
        Ok(Some(ResolvedDocument {
            kind,
            scene_id,
            local_id: id,
        }))
    }

    async fn fetch_region(&self, id: Uuid) -> Result<Option<RegionRef>, DomainError> {
        let row: Option<RegionRow> = sqlx::query_as(SELECT_REGION)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(row.map(region_from_row))
    }

    async fn region_ids(&self, scene_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as("SELECT region_id FROM regions WHERE scene_id = $1")
            .bind(scene_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn fetch_entity(&self, id: Uuid) -> Result<Option<EntityRef>, DomainError> {
        let row: Option<EntityRow> = sqlx::query_as(SELECT_ENTITY)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(row.map(entity_from_row))
    }

    async fn entities_in_region(&self, region_id: Uuid) -> Result<Vec<EntityRef>, DomainError> {
        let rows: Vec<EntityRow> = sqlx::query_as(SELECT_ENTITIES_IN_REGION)
            .bind(region_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;
        Ok(rows.into_iter().map(entity_from_row).collect())
    }

    async fn update_entity_position(
        &self,
        entity_id: Uuid,
        position: Point,
        options: UpdateOptions,
    ) -> Result<(), DomainError> {
        // Animation is a client concern; the row only records where it landed.
        let result = sqlx::query(
            "UPDATE entities SET x = $2, y = $3, region_id = COALESCE($4, region_id) \
             WHERE entity_id = $1",
        )
        .bind(entity_id)
        .bind(position.x)
        .bind(position.y)
        .bind(options.region_id)
        .execute(&self.pool)
        .await
        .map_err(|e| infrastructure(&e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("entity {entity_id}")));
        }
        Ok(())
    }

    async fn update_entity_elevation(
        &self,
        entity_id: Uuid,
        elevation: f64,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE entities SET elevation = $2 WHERE entity_id = $1")
            .bind(entity_id)
            .bind(elevation)
            .execute(&self.pool)
            .await
            .map_err(|e| infrastructure(&e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("entity {entity_id}")));
        }
        Ok(())
    }
}
