//! Read-path DTOs for rendering.
//!
//! Every user-supplied string is escaped here, once, right before it leaves
//! for markup interpolation. URLs and counters are system-generated and pass
//! through untouched.

use chrono::{DateTime, Utc};
use ludia_core::models::{Comment, GameRecord};
use ludia_core::sanitize::escape;
use serde::Serialize;
use uuid::Uuid;

/// One catalog card, escaped and ready for interpolation.
#[derive(Debug, Clone, Serialize)]
pub struct GameCard {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author_name: String,
    pub cover_url: Option<String>,
    pub views: u64,
    pub likes: u64,
    pub comments_count: u64,
    /// Whether the viewing user has liked this game.
    pub liked_by_viewer: bool,
    /// Whether the viewing user owns this game (shows the edit affordance).
    pub owned_by_viewer: bool,
}

impl GameCard {
    pub fn from_record(game: &GameRecord, viewer: Option<Uuid>) -> Self {
        Self {
            id: game.id,
            title: escape(&game.title).into_owned(),
            description: escape(&game.description).into_owned(),
            author_name: escape(&game.author_name).into_owned(),
            cover_url: game.cover_url.clone(),
            views: game.views,
            likes: game.likes,
            comments_count: game.comments_count,
            liked_by_viewer: viewer.map(|v| game.is_liked_by(v)).unwrap_or(false),
            owned_by_viewer: viewer.map(|v| game.author_id == v).unwrap_or(false),
        }
    }
}

/// One rendered comment, escaped.
#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub author_name: String,
    pub body: String,
    pub posted_at: DateTime<Utc>,
}

impl CommentView {
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            author_name: escape(&comment.author_name).into_owned(),
            body: escape(&comment.body).into_owned(),
            posted_at: comment.created_at,
        }
    }
}

/// Compact counter formatting for card stats: 999, 1.5K, 2.1M.
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ludia_core::models::GameFile;

    fn hostile_game() -> GameRecord {
        GameRecord::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "<script>steal()</script>".into(),
            "\"Best\" & <i>only</i> game".into(),
            "it's <b>fun</b>".into(),
            vec![GameFile {
                name: "index.html".into(),
                url: "http://files.test/index.html".into(),
            }],
            None,
            Utc::now(),
        )
    }

    #[test]
    fn test_card_escapes_user_text() {
        let card = GameCard::from_record(&hostile_game(), None);
        assert_eq!(card.title, "&quot;Best&quot; &amp; &lt;i&gt;only&lt;/i&gt; game");
        assert_eq!(card.description, "it&#39;s &lt;b&gt;fun&lt;/b&gt;");
        assert!(!card.author_name.contains('<'));
    }

    #[test]
    fn test_card_viewer_flags() {
        let game = hostile_game();
        let stranger = GameCard::from_record(&game, Some(Uuid::new_v4()));
        assert!(!stranger.owned_by_viewer);
        assert!(!stranger.liked_by_viewer);

        let owner = GameCard::from_record(&game, Some(game.author_id));
        assert!(owner.owned_by_viewer);
    }

    #[test]
    fn test_comment_view_escapes_body() {
        let comment = Comment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "ana".into(),
            "<img src=x onerror=alert(1)>".into(),
            Utc::now(),
        );
        let view = CommentView::from_comment(&comment);
        assert!(view.body.starts_with("&lt;img"));
        assert!(!view.body.contains('<'));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.0K");
        assert_eq!(format_count(1_530), "1.5K");
        assert_eq!(format_count(2_100_000), "2.1M");
    }
}
