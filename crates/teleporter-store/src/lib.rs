//! `PostgreSQL` persistence for scenes and region groups.

pub mod pg_group_registry;
pub mod pg_scene_store;
pub mod schema;

use teleporter_core::error::DomainError;

pub(crate) fn infrastructure(err: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}
