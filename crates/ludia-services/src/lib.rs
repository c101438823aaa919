//! Ludia service layer.
//!
//! Orchestration between the admission pipeline, the storage collaborator
//! and the catalog: publishing and updating games, engagement (views, likes,
//! comments), user-facing notifications and the escaped read-path DTOs.

pub mod cards;
pub mod engagement;
pub mod notify;
pub mod publish;

pub use cards::{format_count, CommentView, GameCard};
pub use engagement::{EngagementService, LikeState, PlaySession};
pub use notify::{notify_report, Notifier, Severity, TracingNotifier};
pub use publish::{GameUpdate, NewGameSubmission, PublishOutcome, PublishService};
