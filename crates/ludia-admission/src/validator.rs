//! Per-file and batch-level bundle validation.

use std::collections::HashSet;

use crate::candidate::CandidateFile;
use crate::rules::ValidationRules;

/// Per-file verdict. The checks run in priority order (extension, size,
/// duplicate); the first failing check wins and short-circuits the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileVerdict {
    Accepted,
    RejectedExtension { extension: Option<String> },
    RejectedSize { size_bytes: u64, max_bytes: u64 },
    RejectedDuplicate,
}

/// Result of validating one batch: per-file verdicts in input order, plus
/// whether the accepted subset satisfies the entry-point requirement.
#[derive(Debug)]
pub struct BatchValidation {
    pub verdicts: Vec<(CandidateFile, FileVerdict)>,
    /// True when at least one accepted file carries the entry extension.
    /// Provisional: the scanner may still demote accepted files, so the
    /// orchestrator re-checks after scanning.
    pub has_entry_point: bool,
}

/// Validates candidate files against the immutable rule set. Pure: neither
/// the batch nor the caller's staged-name set is mutated.
#[derive(Debug, Clone)]
pub struct BundleValidator {
    rules: ValidationRules,
}

impl BundleValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Validate a batch. `staged_names` are names already accepted earlier in
    /// the same upload session; duplicate checks run against the union of
    /// those and the names accepted so far in this batch (case-sensitive
    /// exact match).
    pub fn validate(&self, batch: Vec<CandidateFile>, staged_names: &[String]) -> BatchValidation {
        let mut seen: HashSet<String> = staged_names.iter().cloned().collect();
        let mut verdicts = Vec::with_capacity(batch.len());
        let mut has_entry_point = false;

        for file in batch {
            let verdict = self.check_file(&file, &seen);
            if verdict == FileVerdict::Accepted {
                seen.insert(file.name.clone());
                if file.extension().as_deref() == Some(self.rules.entry_extension()) {
                    has_entry_point = true;
                }
            } else {
                tracing::debug!(file = %file.name, verdict = ?verdict, "File failed validation");
            }
            verdicts.push((file, verdict));
        }

        BatchValidation {
            verdicts,
            has_entry_point,
        }
    }

    fn check_file(&self, file: &CandidateFile, accepted_names: &HashSet<String>) -> FileVerdict {
        let extension = file.extension();
        match &extension {
            Some(ext) if self.rules.is_allowed(ext) => {}
            _ => return FileVerdict::RejectedExtension { extension },
        }

        if file.size_bytes > self.rules.max_size_bytes() {
            return FileVerdict::RejectedSize {
                size_bytes: file.size_bytes,
                max_bytes: self.rules.max_size_bytes(),
            };
        }

        if accepted_names.contains(&file.name) {
            return FileVerdict::RejectedDuplicate;
        }

        FileVerdict::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> BundleValidator {
        BundleValidator::new(ValidationRules::default())
    }

    fn small_rules() -> ValidationRules {
        ValidationRules::new([".html", ".js"], 100, ".html")
    }

    #[test]
    fn test_rejects_disallowed_extension_regardless_of_size() {
        let batch = vec![CandidateFile::new("payload.exe", "MZ")];
        let result = validator().validate(batch, &[]);
        assert_eq!(
            result.verdicts[0].1,
            FileVerdict::RejectedExtension {
                extension: Some(".exe".to_string())
            }
        );
    }

    #[test]
    fn test_rejects_name_without_extension() {
        let result = validator().validate(vec![CandidateFile::new("README", "hi")], &[]);
        assert_eq!(
            result.verdicts[0].1,
            FileVerdict::RejectedExtension { extension: None }
        );
    }

    #[test]
    fn test_rejects_oversized_file() {
        let validator = BundleValidator::new(small_rules());
        let batch = vec![CandidateFile::new("big.js", vec![b'x'; 101])];
        let result = validator.validate(batch, &[]);
        assert_eq!(
            result.verdicts[0].1,
            FileVerdict::RejectedSize {
                size_bytes: 101,
                max_bytes: 100
            }
        );
    }

    #[test]
    fn test_extension_check_outranks_size_check() {
        let validator = BundleValidator::new(small_rules());
        let batch = vec![CandidateFile::new("big.exe", vec![b'x'; 101])];
        let result = validator.validate(batch, &[]);
        assert!(matches!(
            result.verdicts[0].1,
            FileVerdict::RejectedExtension { .. }
        ));
    }

    #[test]
    fn test_rejects_duplicate_within_batch() {
        let batch = vec![
            CandidateFile::new("index.html", "<html>"),
            CandidateFile::new("index.html", "<html>v2"),
        ];
        let result = validator().validate(batch, &[]);
        assert_eq!(result.verdicts[0].1, FileVerdict::Accepted);
        assert_eq!(result.verdicts[1].1, FileVerdict::RejectedDuplicate);
    }

    #[test]
    fn test_rejects_duplicate_against_staged_names() {
        let staged = vec!["style.css".to_string()];
        let result = validator().validate(vec![CandidateFile::new("style.css", "body{}")], &staged);
        assert_eq!(result.verdicts[0].1, FileVerdict::RejectedDuplicate);
    }

    #[test]
    fn test_duplicate_check_is_case_sensitive() {
        let batch = vec![
            CandidateFile::new("Index.html", "<html>"),
            CandidateFile::new("index.html", "<html>"),
        ];
        let result = validator().validate(batch, &[]);
        assert_eq!(result.verdicts[1].1, FileVerdict::Accepted);
    }

    #[test]
    fn test_rejected_file_does_not_reserve_its_name() {
        // Only accepted names count for the duplicate check.
        let batch = vec![
            CandidateFile::new("game.js", vec![b'x'; 200]),
            CandidateFile::new("game.js", "ok"),
        ];
        let validator = BundleValidator::new(small_rules());
        let result = validator.validate(batch, &[]);
        assert!(matches!(
            result.verdicts[0].1,
            FileVerdict::RejectedSize { .. }
        ));
        assert_eq!(result.verdicts[1].1, FileVerdict::Accepted);
    }

    #[test]
    fn test_entry_point_flag() {
        let with_entry = validator().validate(
            vec![
                CandidateFile::new("index.html", "<html>"),
                CandidateFile::new("a.js", "x"),
            ],
            &[],
        );
        assert!(with_entry.has_entry_point);

        let without_entry =
            validator().validate(vec![CandidateFile::new("a.js", "x")], &[]);
        assert!(!without_entry.has_entry_point);

        // A rejected entry-point candidate does not satisfy the requirement.
        let validator = BundleValidator::new(small_rules());
        let rejected_entry =
            validator.validate(vec![CandidateFile::new("index.html", vec![b'x'; 101])], &[]);
        assert!(!rejected_entry.has_entry_point);
    }
}
