//! Immutable catalog snapshots.

use std::sync::Arc;

use ludia_core::models::GameRecord;
use uuid::Uuid;

/// A point-in-time view of the whole catalog. Cheap to clone; games are
/// shared behind an `Arc` and never mutated in place.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    revision: u64,
    games: Arc<[GameRecord]>,
}

impl CatalogSnapshot {
    pub fn empty() -> Self {
        Self {
            revision: 0,
            games: Arc::from(Vec::new()),
        }
    }

    pub(crate) fn next(&self, games: Vec<GameRecord>) -> Self {
        Self {
            revision: self.revision + 1,
            games: Arc::from(games),
        }
    }

    /// Monotonically increasing; bumped on every published mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&GameRecord> {
        self.games.iter().find(|g| g.id == id)
    }

    /// Case-insensitive substring search over title, description and author
    /// name. An empty (or whitespace) query returns the full catalog.
    pub fn search(&self, query: &str) -> Vec<&GameRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.games.iter().collect();
        }
        self.games
            .iter()
            .filter(|g| {
                g.title.to_lowercase().contains(&query)
                    || g.description.to_lowercase().contains(&query)
                    || g.author_name.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Top-`count` games by engagement score (views + likes), ties keeping
    /// catalog order.
    pub fn featured(&self, count: usize) -> Vec<&GameRecord> {
        let mut ranked: Vec<&GameRecord> = self.games.iter().collect();
        ranked.sort_by(|a, b| b.engagement_score().cmp(&a.engagement_score()));
        ranked.truncate(count);
        ranked
    }

    /// One catalog page, zero-indexed.
    pub fn page(&self, page: usize, per_page: usize) -> &[GameRecord] {
        let start = page.saturating_mul(per_page).min(self.games.len());
        let end = start.saturating_add(per_page).min(self.games.len());
        &self.games[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ludia_core::models::GameFile;

    fn game(title: &str, author: &str, views: u64, likes: u64) -> GameRecord {
        let mut record = GameRecord::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            author.to_string(),
            title.to_string(),
            format!("{} description", title),
            vec![GameFile {
                name: "index.html".into(),
                url: "http://files.test/index.html".into(),
            }],
            None,
            Utc::now(),
        );
        record.views = views;
        record.likes = likes;
        record
    }

    fn snapshot(games: Vec<GameRecord>) -> CatalogSnapshot {
        CatalogSnapshot::empty().next(games)
    }

    #[test]
    fn test_search_matches_title_description_author() {
        let snap = snapshot(vec![
            game("Snake Classic", "ana", 0, 0),
            game("Space Run", "bruno", 0, 0),
        ]);

        let titles =
            |hits: Vec<&GameRecord>| hits.iter().map(|g| g.title.clone()).collect::<Vec<_>>();

        assert_eq!(titles(snap.search("snake")), ["Snake Classic"]);
        assert_eq!(titles(snap.search("BRUNO")), ["Space Run"]);
        assert_eq!(titles(snap.search("description")).len(), 2);
        assert!(snap.search("tetris").is_empty());
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let snap = snapshot(vec![game("A", "x", 0, 0), game("B", "y", 0, 0)]);
        assert_eq!(snap.search("").len(), 2);
        assert_eq!(snap.search("   ").len(), 2);
    }

    #[test]
    fn test_featured_ranks_by_views_plus_likes() {
        let snap = snapshot(vec![
            game("low", "a", 1, 0),
            game("high", "b", 10, 5),
            game("mid", "c", 4, 3),
        ]);

        let featured: Vec<&str> = snap.featured(2).iter().map(|g| g.title.as_str()).collect();
        assert_eq!(featured, ["high", "mid"]);
    }

    #[test]
    fn test_featured_handles_short_catalog() {
        let snap = snapshot(vec![game("only", "a", 0, 0)]);
        assert_eq!(snap.featured(4).len(), 1);
    }

    #[test]
    fn test_page() {
        let snap = snapshot((0..5).map(|i| game(&format!("g{}", i), "a", 0, 0)).collect());
        assert_eq!(snap.page(0, 2).len(), 2);
        assert_eq!(snap.page(2, 2).len(), 1);
        assert!(snap.page(3, 2).is_empty());
    }
}
