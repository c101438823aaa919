//! Per-game comment threads.

use std::collections::HashMap;
use std::sync::RwLock;

use ludia_core::models::Comment;
use uuid::Uuid;

/// Comment threads keyed by game. Reads return owned, newest-first copies so
/// callers never hold the lock across rendering.
#[derive(Default)]
pub struct CommentStore {
    threads: RwLock<HashMap<Uuid, Vec<Comment>>>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, comment: Comment) {
        let mut threads = self.threads.write().unwrap_or_else(|e| e.into_inner());
        threads.entry(comment.game_id).or_default().push(comment);
    }

    /// All comments for a game, newest first.
    pub fn for_game(&self, game_id: Uuid) -> Vec<Comment> {
        let threads = self.threads.read().unwrap_or_else(|e| e.into_inner());
        let mut comments = threads.get(&game_id).cloned().unwrap_or_default();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        comments
    }

    pub fn count(&self, game_id: Uuid) -> usize {
        let threads = self.threads.read().unwrap_or_else(|e| e.into_inner());
        threads.get(&game_id).map(|t| t.len()).unwrap_or(0)
    }
}
