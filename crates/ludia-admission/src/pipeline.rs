//! Admission orchestration: validate → scan → report.

use crate::candidate::CandidateFile;
use crate::report::{AdmissionReport, RejectedFile, RejectionReason};
use crate::rules::ValidationRules;
use crate::scanner::{PatternScanner, ScanVerdict};
use crate::validator::{BundleValidator, FileVerdict};

/// Sequences the bundle validator and the content scanner over a batch and
/// produces a single [`AdmissionReport`]. Deterministic and side-effect-free:
/// no I/O, no shared mutable state; callers serialize runs per upload session
/// so the staged-name context stays coherent. Abandoning a report requires no
/// cleanup.
#[derive(Debug, Clone)]
pub struct AdmissionPipeline {
    validator: BundleValidator,
    scanner: PatternScanner,
}

impl AdmissionPipeline {
    pub fn new(rules: ValidationRules, scanner: PatternScanner) -> Self {
        Self {
            validator: BundleValidator::new(rules),
            scanner,
        }
    }

    pub fn rules(&self) -> &ValidationRules {
        self.validator.rules()
    }

    /// Admit a new-game bundle: per-file validation, content scan, and the
    /// batch-level entry-point requirement.
    pub fn admit(&self, files: Vec<CandidateFile>, staged_names: &[String]) -> AdmissionReport {
        self.run(files, staged_names, true)
    }

    /// Admit files merged into an already-published bundle. Same per-file
    /// checks and scanning, but no entry-point requirement: the published
    /// bundle already has one.
    pub fn admit_merge(
        &self,
        files: Vec<CandidateFile>,
        staged_names: &[String],
    ) -> AdmissionReport {
        self.run(files, staged_names, false)
    }

    fn run(
        &self,
        files: Vec<CandidateFile>,
        staged_names: &[String],
        require_entry_point: bool,
    ) -> AdmissionReport {
        let batch = self.validator.validate(files, staged_names);

        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for (file, verdict) in batch.verdicts {
            match verdict {
                FileVerdict::Accepted => match self.scan_file(&file) {
                    ScanVerdict::Clean => accepted.push(file),
                    ScanVerdict::Flagged { reason } => {
                        tracing::debug!(file = %file.name, %reason, "Scanner demoted file");
                        rejected.push(RejectedFile {
                            file,
                            reason: RejectionReason::ContentPattern { reason },
                        });
                    }
                },
                FileVerdict::RejectedExtension { extension } => rejected.push(RejectedFile {
                    file,
                    reason: RejectionReason::Extension { extension },
                }),
                FileVerdict::RejectedSize {
                    size_bytes,
                    max_bytes,
                } => rejected.push(RejectedFile {
                    file,
                    reason: RejectionReason::Size {
                        size_bytes,
                        max_bytes,
                    },
                }),
                FileVerdict::RejectedDuplicate => rejected.push(RejectedFile {
                    file,
                    reason: RejectionReason::Duplicate,
                }),
            }
        }

        let mut batch_rejection = None;
        if require_entry_point {
            let entry = self.rules().entry_extension();
            let has_entry = accepted
                .iter()
                .any(|f| f.extension().as_deref() == Some(entry));
            if !has_entry {
                // Batch-wide rejection: demote every survivor so no partially
                // accepted report escapes.
                let reason = RejectionReason::MissingEntryPoint {
                    entry_extension: entry.to_string(),
                };
                tracing::debug!(entry_extension = %entry, "Batch missing entry point");
                for file in accepted.drain(..) {
                    rejected.push(RejectedFile {
                        file,
                        reason: reason.clone(),
                    });
                }
                batch_rejection = Some(reason);
            }
        }

        AdmissionReport {
            accepted,
            rejected,
            batch_rejection,
        }
    }

    /// Scan one per-file-accepted candidate. Binary (non-UTF-8) assets bypass
    /// the scanner; unavailable content is rejected conservatively.
    fn scan_file(&self, file: &CandidateFile) -> ScanVerdict {
        if file.is_unavailable() {
            return ScanVerdict::Flagged {
                reason: "content unavailable for scanning".to_string(),
            };
        }
        match file.text() {
            Some(text) => self.scanner.scan(text),
            None => ScanVerdict::Clean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn pipeline() -> AdmissionPipeline {
        AdmissionPipeline::new(
            ValidationRules::default(),
            PatternScanner::with_default_patterns().expect("default patterns compile"),
        )
    }

    fn names(files: &[CandidateFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_binary_asset_bypasses_scan() {
        // Bytes that would match a pattern if decoded, but are not UTF-8.
        let mut data = b"eval(".to_vec();
        data.push(0xff);
        let report = pipeline().admit(
            vec![
                CandidateFile::new("index.html", "<canvas></canvas>"),
                CandidateFile::new("noise.png", Bytes::from(data)),
            ],
            &[],
        );
        assert_eq!(names(&report.accepted), ["index.html", "noise.png"]);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_unavailable_content_is_rejected_conservatively() {
        let report = pipeline().admit(
            vec![
                CandidateFile::new("index.html", "<canvas></canvas>"),
                CandidateFile::unavailable("ghost.js", 64),
            ],
            &[],
        );
        assert_eq!(names(&report.accepted), ["index.html"]);
        assert_eq!(report.rejected.len(), 1);
        assert!(matches!(
            report.rejected[0].reason,
            RejectionReason::ContentPattern { .. }
        ));
    }

    #[test]
    fn test_scanner_demotion_feeds_entry_point_check() {
        // The only entry-point candidate is flagged, so the batch as a whole
        // fails the entry-point requirement too.
        let report = pipeline().admit(
            vec![CandidateFile::new("index.html", "eval(userInput)")],
            &[],
        );
        assert!(report.accepted.is_empty());
        assert_eq!(report.rejected.len(), 1);
        assert!(matches!(
            report.rejected[0].reason,
            RejectionReason::ContentPattern { .. }
        ));
        assert!(matches!(
            report.batch_rejection,
            Some(RejectionReason::MissingEntryPoint { .. })
        ));
        assert!(!report.is_publishable());
    }

    #[test]
    fn test_merge_admission_skips_entry_point_requirement() {
        let report = pipeline().admit_merge(
            vec![CandidateFile::new("patch.js", "let fix = true;")],
            &[],
        );
        assert!(report.is_publishable());
        assert!(report.batch_rejection.is_none());
    }

    #[test]
    fn test_report_is_deterministic() {
        let build = || {
            pipeline().admit(
                vec![
                    CandidateFile::new("index.html", "<canvas></canvas>"),
                    CandidateFile::new("tool.exe", "MZ"),
                    CandidateFile::new("game.js", "document.cookie"),
                ],
                &[],
            )
        };
        let a = build();
        let b = build();
        assert_eq!(names(&a.accepted), names(&b.accepted));
        assert_eq!(a.rejected.len(), b.rejected.len());
        for (left, right) in a.rejected.iter().zip(b.rejected.iter()) {
            assert_eq!(left.file.name, right.file.name);
            assert_eq!(left.reason, right.reason);
        }
    }
}
