//! Engagement: playing, liking, commenting.

use std::sync::Arc;

use chrono::Utc;
use ludia_catalog::{CatalogStore, CommentStore};
use ludia_core::models::Comment;
use ludia_core::validation::{validate_author_name, validate_comment_body};
use ludia_core::AppError;
use uuid::Uuid;

/// What the player frame needs to start a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaySession {
    pub game_id: Uuid,
    pub title: String,
    pub entry_url: String,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub likes: u64,
}

pub struct EngagementService {
    catalog: Arc<CatalogStore>,
    comments: Arc<CommentStore>,
    entry_extension: String,
}

impl EngagementService {
    pub fn new(
        catalog: Arc<CatalogStore>,
        comments: Arc<CommentStore>,
        entry_extension: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            comments,
            entry_extension: entry_extension.into(),
        }
    }

    /// Resolve the entry-point URL for the player frame and count the view.
    pub fn play(&self, game_id: Uuid) -> Result<PlaySession, AppError> {
        let snapshot = self.catalog.snapshot();
        let game = snapshot
            .get(game_id)
            .ok_or_else(|| AppError::NotFound(format!("Game not found: {}", game_id)))?;
        let entry = game.entry_point(&self.entry_extension).ok_or_else(|| {
            AppError::NotFound(format!("Game has no {} entry file", self.entry_extension))
        })?;

        let session = PlaySession {
            game_id,
            title: game.title.clone(),
            entry_url: entry.url.clone(),
        };

        self.catalog
            .update(game_id, |game| game.views += 1)
            .map_err(|_| AppError::NotFound(format!("Game not found: {}", game_id)))?;

        Ok(session)
    }

    /// Toggle a user's like. Adding inserts the user into `liked_by` and
    /// bumps the counter; removing does the inverse, floored at zero.
    pub fn toggle_like(&self, game_id: Uuid, user_id: Uuid) -> Result<LikeState, AppError> {
        self.catalog
            .update(game_id, |game| {
                if game.liked_by.remove(&user_id) {
                    game.likes = game.likes.saturating_sub(1);
                    LikeState {
                        liked: false,
                        likes: game.likes,
                    }
                } else {
                    game.liked_by.insert(user_id);
                    game.likes += 1;
                    LikeState {
                        liked: true,
                        likes: game.likes,
                    }
                }
            })
            .map_err(|_| AppError::NotFound(format!("Game not found: {}", game_id)))
    }

    /// Post a comment. The body is stored raw and escaped on the read path.
    pub fn add_comment(
        &self,
        game_id: Uuid,
        author_id: Uuid,
        author_name: &str,
        body: &str,
    ) -> Result<Comment, AppError> {
        validate_comment_body(body).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        validate_author_name(author_name).map_err(|e| AppError::InvalidInput(e.to_string()))?;

        // The count update below also confirms the game exists; check first
        // so no orphan comment is stored.
        if self.catalog.snapshot().get(game_id).is_none() {
            return Err(AppError::NotFound(format!("Game not found: {}", game_id)));
        }

        let comment = Comment::new(
            game_id,
            author_id,
            author_name.to_string(),
            body.to_string(),
            Utc::now(),
        );
        self.comments.add(comment.clone());
        self.catalog
            .update(game_id, |game| game.comments_count += 1)
            .map_err(|_| AppError::NotFound(format!("Game not found: {}", game_id)))?;

        tracing::debug!(game_id = %game_id, "Comment added");
        Ok(comment)
    }

    /// Comments for a game, newest first.
    pub fn comments_for(&self, game_id: Uuid) -> Vec<Comment> {
        self.comments.for_game(game_id)
    }
}
