//! The actor on whose behalf an operation runs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The invoking actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Actor identifier, matched against entity owner lists.
    pub id: Uuid,
    /// Whether the actor holds elevated (game master) privileges.
    pub elevated: bool,
}

impl Actor {
    /// Creates an ordinary, unprivileged actor.
    #[must_use]
    pub fn player(id: Uuid) -> Self {
        Self {
            id,
            elevated: false,
        }
    }

    /// Creates an actor with elevated privileges.
    #[must_use]
    pub fn game_master(id: Uuid) -> Self {
        Self { id, elevated: true }
    }
}
