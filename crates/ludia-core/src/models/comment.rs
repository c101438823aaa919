use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::COMMENT_SCHEMA_VERSION;

/// A comment on a published game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub game_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub schema_version: u32,
}

impl Comment {
    pub fn new(
        game_id: Uuid,
        author_id: Uuid,
        author_name: String,
        body: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_id,
            author_id,
            author_name,
            body,
            created_at: now,
            schema_version: COMMENT_SCHEMA_VERSION,
        }
    }
}
