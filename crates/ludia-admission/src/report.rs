//! Admission outcomes as data.

use std::fmt;

use serde::Serialize;

use crate::candidate::CandidateFile;

/// Why a file (or a whole batch) was rejected. Rejections are data, never
/// raised faults: the pipeline is defined for all inputs and the caller
/// decides presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    /// File type not in the allow-list.
    Extension { extension: Option<String> },
    /// File exceeds the size ceiling.
    Size { size_bytes: u64, max_bytes: u64 },
    /// Name collision within the batch or the staged session.
    Duplicate,
    /// Batch-wide: no accepted file carries the entry extension.
    MissingEntryPoint { entry_extension: String },
    /// The content scanner matched a forbidden pattern (or the content was
    /// unavailable and rejected conservatively).
    ContentPattern { reason: String },
}

impl RejectionReason {
    /// Batch-level reasons apply to the whole submission, not one file.
    pub fn is_batch_level(&self) -> bool {
        matches!(self, RejectionReason::MissingEntryPoint { .. })
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::Extension { extension } => match extension {
                Some(ext) => write!(f, "file type not allowed: {}", ext),
                None => write!(f, "file has no recognizable type"),
            },
            RejectionReason::Size {
                size_bytes,
                max_bytes,
            } => write!(
                f,
                "file too large: {} bytes (max: {} bytes)",
                size_bytes, max_bytes
            ),
            RejectionReason::Duplicate => write!(f, "a file with this name was already added"),
            RejectionReason::MissingEntryPoint { entry_extension } => write!(
                f,
                "the bundle has no {} entry-point file",
                entry_extension
            ),
            RejectionReason::ContentPattern { reason } => {
                write!(f, "content rejected: {}", reason)
            }
        }
    }
}

/// One rejected file with its reason.
#[derive(Debug, Clone)]
pub struct RejectedFile {
    pub file: CandidateFile,
    pub reason: RejectionReason,
}

/// The outcome of one admission run. Produced once, consumed once by the
/// publish step, never persisted. A file appears in exactly one of
/// `accepted`/`rejected`.
#[derive(Debug, Clone, Default)]
pub struct AdmissionReport {
    pub accepted: Vec<CandidateFile>,
    pub rejected: Vec<RejectedFile>,
    /// Set when the whole batch was rejected (missing entry point). Surfaced
    /// distinctly from per-file rejections; when set, `accepted` is empty.
    pub batch_rejection: Option<RejectionReason>,
}

impl AdmissionReport {
    /// The external upload step only runs on a publishable report: at least
    /// one accepted file and no batch-level rejection.
    pub fn is_publishable(&self) -> bool {
        !self.accepted.is_empty() && self.batch_rejection.is_none()
    }

    pub fn accepted_names(&self) -> impl Iterator<Item = &str> {
        self.accepted.iter().map(|f| f.name.as_str())
    }

    /// Does the accepted set contain a file with the given entry extension?
    pub fn has_entry_point(&self, entry_extension: &str) -> bool {
        self.accepted
            .iter()
            .any(|f| f.extension().as_deref() == Some(entry_extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display() {
        let reason = RejectionReason::Extension {
            extension: Some(".exe".to_string()),
        };
        assert_eq!(reason.to_string(), "file type not allowed: .exe");

        let reason = RejectionReason::MissingEntryPoint {
            entry_extension: ".html".to_string(),
        };
        assert!(reason.is_batch_level());
        assert!(reason.to_string().contains(".html"));
    }

    #[test]
    fn test_reason_serializes_with_kind_tag() {
        let reason = RejectionReason::Size {
            size_bytes: 11,
            max_bytes: 10,
        };
        let json = serde_json::to_value(&reason).expect("serialize");
        assert_eq!(json["kind"], "size");
        assert_eq!(json["size_bytes"], 11);
    }

    #[test]
    fn test_publishable() {
        let mut report = AdmissionReport::default();
        assert!(!report.is_publishable());

        report.accepted.push(CandidateFile::new("index.html", "<!doctype html>"));
        assert!(report.is_publishable());
        assert!(report.has_entry_point(".html"));

        report.batch_rejection = Some(RejectionReason::MissingEntryPoint {
            entry_extension: ".html".to_string(),
        });
        assert!(!report.is_publishable());
    }
}
