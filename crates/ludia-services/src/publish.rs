//! Publishing and updating games.
//!
//! The only path by which files reach storage and records reach the catalog.
//! Admission rejections are data ([`PublishOutcome::Rejected`]); `AppError`
//! is reserved for collaborator faults and invalid submission metadata.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use ludia_admission::{AdmissionPipeline, AdmissionReport, CandidateFile};
use ludia_catalog::{CatalogStore, UserDirectory};
use ludia_core::models::{GameFile, GameRecord};
use ludia_core::validation::validate_author_name;
use ludia_core::AppError;
use ludia_storage::{content_type_for, Storage, StorageError};
use uuid::Uuid;
use validator::Validate;

use crate::notify::{notify_report, Notifier, Severity};

/// Name under which a game's cover image is stored.
const COVER_FILENAME: &str = "cover.png";

/// A new-game submission. Field constraints are enforced before any file is
/// touched.
#[derive(Debug, Validate)]
pub struct NewGameSubmission {
    pub author_id: Uuid,
    pub author_name: String,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: String,
    pub files: Vec<CandidateFile>,
    /// Optional cover image, stored alongside the bundle.
    pub cover: Option<Bytes>,
}

/// Edit to an existing game. Only the owning author may apply it.
#[derive(Debug, Default, Validate)]
pub struct GameUpdate {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// New or replacement bundle files; same-name files replace.
    pub files: Vec<CandidateFile>,
    pub cover: Option<Bytes>,
}

/// Outcome of a publish or update attempt.
#[derive(Debug)]
pub enum PublishOutcome {
    Published(GameRecord),
    /// The bundle did not survive admission; nothing was stored.
    Rejected(AdmissionReport),
}

impl PublishOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, PublishOutcome::Published(_))
    }
}

/// Orchestrates admission, storage writes and catalog record creation.
pub struct PublishService {
    storage: Arc<dyn Storage>,
    catalog: Arc<CatalogStore>,
    users: Arc<UserDirectory>,
    pipeline: AdmissionPipeline,
    notifier: Arc<dyn Notifier>,
}

impl PublishService {
    pub fn new(
        storage: Arc<dyn Storage>,
        catalog: Arc<CatalogStore>,
        users: Arc<UserDirectory>,
        pipeline: AdmissionPipeline,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            storage,
            catalog,
            users,
            pipeline,
            notifier,
        }
    }

    /// Publish a new game. Storage and the catalog are only touched when the
    /// admission report is publishable (non-empty accepted set containing an
    /// entry-point file).
    pub async fn publish(&self, submission: NewGameSubmission) -> Result<PublishOutcome, AppError> {
        submission.validate()?;
        validate_author_name(&submission.author_name)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let report = self.pipeline.admit(submission.files, &[]);
        notify_report(self.notifier.as_ref(), &report);
        if !report.is_publishable() {
            tracing::debug!(title = %submission.title, "Submission rejected by admission");
            return Ok(PublishOutcome::Rejected(report));
        }

        let game_id = Uuid::new_v4();
        let files = self.store_accepted(game_id, &report.accepted).await?;
        let cover_url = match &submission.cover {
            Some(data) => Some(self.store_cover(game_id, data.clone()).await?),
            None => None,
        };

        let game = GameRecord::new(
            game_id,
            submission.author_id,
            submission.author_name,
            submission.title,
            submission.description,
            files,
            cover_url,
            Utc::now(),
        );

        self.catalog.insert(game.clone());
        self.users.record_published(submission.author_id);
        self.notifier
            .notify(Severity::Success, "Game published successfully");
        tracing::info!(game_id = %game.id, title = %game.title, "Game published");

        Ok(PublishOutcome::Published(game))
    }

    /// Update an existing game. New files pass the same admission checks
    /// (minus the entry-point requirement, which the published bundle already
    /// satisfies) and merge over the current file list.
    pub async fn update(
        &self,
        game_id: Uuid,
        author_id: Uuid,
        update: GameUpdate,
    ) -> Result<PublishOutcome, AppError> {
        update.validate()?;

        let snapshot = self.catalog.snapshot();
        let game = snapshot
            .get(game_id)
            .ok_or_else(|| AppError::NotFound(format!("Game not found: {}", game_id)))?;
        if game.author_id != author_id {
            return Err(AppError::Unauthorized(
                "Only the author can edit this game".to_string(),
            ));
        }

        let mut new_files = Vec::new();
        if !update.files.is_empty() {
            let report = self.pipeline.admit_merge(update.files, &[]);
            notify_report(self.notifier.as_ref(), &report);
            if !report.is_publishable() {
                return Ok(PublishOutcome::Rejected(report));
            }
            new_files = self.store_accepted(game_id, &report.accepted).await?;
        }

        let cover_url = match &update.cover {
            Some(data) => Some(self.store_cover(game_id, data.clone()).await?),
            None => None,
        };

        let updated = self
            .catalog
            .update(game_id, |game| {
                if let Some(title) = &update.title {
                    game.title = title.clone();
                }
                if let Some(description) = &update.description {
                    game.description = description.clone();
                }
                game.merge_files(new_files.clone());
                if let Some(url) = &cover_url {
                    game.cover_url = Some(url.clone());
                }
                game.updated_at = Utc::now();
                game.clone()
            })
            .map_err(|_| AppError::NotFound(format!("Game not found: {}", game_id)))?;

        self.notifier
            .notify(Severity::Success, "Game updated successfully");
        tracing::info!(game_id = %game_id, "Game updated");

        Ok(PublishOutcome::Published(updated))
    }

    /// Upload admission-accepted files and collect their issued URLs.
    async fn store_accepted(
        &self,
        game_id: Uuid,
        accepted: &[CandidateFile],
    ) -> Result<Vec<GameFile>, AppError> {
        let mut files = Vec::with_capacity(accepted.len());
        for file in accepted {
            let data = file.bytes().cloned().ok_or_else(|| {
                AppError::Internal(format!("Accepted file without content: {}", file.name))
            })?;
            let (_, url) = self
                .storage
                .upload(game_id, &file.name, content_type_for(&file.name), data)
                .await
                .map_err(storage_error)?;
            files.push(GameFile {
                name: file.name.clone(),
                url,
            });
        }
        Ok(files)
    }

    async fn store_cover(&self, game_id: Uuid, data: Bytes) -> Result<String, AppError> {
        let (_, url) = self
            .storage
            .upload(game_id, COVER_FILENAME, "image/png", data)
            .await
            .map_err(storage_error)?;
        Ok(url)
    }
}

fn storage_error(err: StorageError) -> AppError {
    AppError::Storage(err.to_string())
}
