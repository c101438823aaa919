//! Snapshot store and subscriptions.

use ludia_core::models::GameRecord;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

use crate::snapshot::CatalogSnapshot;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Game not found: {0}")]
    GameNotFound(Uuid),
}

/// Holds the current catalog snapshot and publishes every replacement to
/// subscribers. Mutations are serialized by the watch channel's internal
/// lock; readers never block writers because they only ever hold a clone of
/// an immutable snapshot.
pub struct CatalogStore {
    tx: watch::Sender<CatalogSnapshot>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::with_games(Vec::new())
    }

    /// Seed the store, e.g. from the external persistence collaborator at
    /// startup.
    pub fn with_games(games: Vec<GameRecord>) -> Self {
        let initial = CatalogSnapshot::empty().next(games);
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.tx.borrow().clone()
    }

    /// Subscribe to snapshot replacements. Dropping the subscription cancels
    /// it; no unsubscribe bookkeeping needed.
    pub fn subscribe(&self) -> CatalogSubscription {
        CatalogSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Insert a new game and publish the new snapshot.
    pub fn insert(&self, game: GameRecord) {
        tracing::debug!(game_id = %game.id, title = %game.title, "Inserting game");
        self.tx.send_modify(|snap| {
            let mut games = snap.games().to_vec();
            games.push(game);
            *snap = snap.next(games);
        });
    }

    /// Apply `mutate` to one game, publish the new snapshot, and return the
    /// closure's result. The closure sees a copy; nothing is shared.
    pub fn update<F, T>(&self, id: Uuid, mutate: F) -> Result<T, CatalogError>
    where
        F: FnOnce(&mut GameRecord) -> T,
    {
        let mut result = None;
        self.tx.send_if_modified(|snap| {
            let mut games = snap.games().to_vec();
            match games.iter_mut().find(|g| g.id == id) {
                Some(game) => {
                    result = Some(mutate(game));
                    *snap = snap.next(games);
                    true
                }
                None => false,
            }
        });
        result.ok_or(CatalogError::GameNotFound(id))
    }

    /// Remove a game, returning its final record.
    pub fn remove(&self, id: Uuid) -> Result<GameRecord, CatalogError> {
        let mut removed = None;
        self.tx.send_if_modified(|snap| {
            let mut games = snap.games().to_vec();
            match games.iter().position(|g| g.id == id) {
                Some(pos) => {
                    removed = Some(games.remove(pos));
                    *snap = snap.next(games);
                    true
                }
                None => false,
            }
        });
        removed.ok_or(CatalogError::GameNotFound(id))
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A cancellable stream of catalog snapshots. `next()` resolves once a newer
/// snapshot than the last observed one is published, or returns `None` when
/// the store is gone.
pub struct CatalogSubscription {
    rx: watch::Receiver<CatalogSnapshot>,
}

impl CatalogSubscription {
    /// The latest snapshot, without waiting.
    pub fn current(&self) -> CatalogSnapshot {
        self.rx.borrow().clone()
    }

    /// Wait for the next published snapshot.
    pub async fn next(&mut self) -> Option<CatalogSnapshot> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ludia_core::models::GameFile;

    fn game(title: &str) -> GameRecord {
        GameRecord::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "ana".into(),
            title.into(),
            "desc".into(),
            vec![GameFile {
                name: "index.html".into(),
                url: "http://files.test/index.html".into(),
            }],
            None,
            Utc::now(),
        )
    }

    #[test]
    fn test_insert_bumps_revision() {
        let store = CatalogStore::new();
        let before = store.snapshot().revision();

        store.insert(game("Snake"));

        let snap = store.snapshot();
        assert_eq!(snap.revision(), before + 1);
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn test_update_replaces_snapshot_not_record() {
        let store = CatalogStore::new();
        let record = game("Snake");
        let id = record.id;
        store.insert(record);

        let old_snap = store.snapshot();
        let views = store
            .update(id, |g| {
                g.views += 1;
                g.views
            })
            .expect("game exists");

        assert_eq!(views, 1);
        // The old snapshot is untouched.
        assert_eq!(old_snap.get(id).map(|g| g.views), Some(0));
        assert_eq!(store.snapshot().get(id).map(|g| g.views), Some(1));
    }

    #[test]
    fn test_update_missing_game() {
        let store = CatalogStore::new();
        let result = store.update(Uuid::new_v4(), |_| ());
        assert!(matches!(result, Err(CatalogError::GameNotFound(_))));
        // Failed updates publish nothing.
        assert_eq!(store.snapshot().revision(), 1);
    }

    #[test]
    fn test_remove() {
        let store = CatalogStore::new();
        let record = game("Snake");
        let id = record.id;
        store.insert(record);

        let removed = store.remove(id).expect("game exists");
        assert_eq!(removed.id, id);
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_subscription_sees_published_snapshots() {
        let store = CatalogStore::new();
        let mut sub = store.subscribe();
        let starting_revision = sub.current().revision();

        store.insert(game("Snake"));

        let snap = sub.next().await.expect("store alive");
        assert_eq!(snap.revision(), starting_revision + 1);
        assert_eq!(snap.len(), 1);
    }

    #[tokio::test]
    async fn test_subscription_ends_when_store_drops() {
        let store = CatalogStore::new();
        let mut sub = store.subscribe();
        drop(store);
        assert!(sub.next().await.is_none());
    }
}
