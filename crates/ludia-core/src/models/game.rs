use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::GAME_SCHEMA_VERSION;

/// One stored file of a published bundle: its name within the bundle and the
/// public URL issued by the storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFile {
    pub name: String,
    pub url: String,
}

/// Catalog record for a published game.
///
/// Records are immutable once inside a catalog snapshot; mutations produce a
/// new record in a new snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub description: String,
    /// Bundle files, in upload order. Names are unique within a record.
    pub files: Vec<GameFile>,
    pub cover_url: Option<String>,
    pub views: u64,
    pub likes: u64,
    /// Users who currently like this game.
    pub liked_by: BTreeSet<Uuid>,
    pub comments_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schema_version: u32,
}

impl GameRecord {
    /// Create a fresh record with zeroed engagement counters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        author_id: Uuid,
        author_name: String,
        title: String,
        description: String,
        files: Vec<GameFile>,
        cover_url: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            author_name,
            title,
            description,
            files,
            cover_url,
            views: 0,
            likes: 0,
            liked_by: BTreeSet::new(),
            comments_count: 0,
            created_at: now,
            updated_at: now,
            schema_version: GAME_SCHEMA_VERSION,
        }
    }

    /// The file the embedded player loads, i.e. the first file whose name
    /// ends with `entry_extension` (case-insensitive).
    pub fn entry_point(&self, entry_extension: &str) -> Option<&GameFile> {
        let entry = entry_extension.to_lowercase();
        self.files
            .iter()
            .find(|f| f.name.to_lowercase().ends_with(&entry))
    }

    /// Linear score used by the featured selection.
    pub fn engagement_score(&self) -> u64 {
        self.views.saturating_add(self.likes)
    }

    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.liked_by.contains(&user_id)
    }

    /// Merge `incoming` files over the existing file list: same-name files
    /// replace, new names append in order.
    pub fn merge_files(&mut self, incoming: Vec<GameFile>) {
        for file in incoming {
            match self.files.iter_mut().find(|f| f.name == file.name) {
                Some(existing) => existing.url = file.url,
                None => self.files.push(file),
            }
        }
    }
}
