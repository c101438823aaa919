//! Heuristic content-pattern scanner.
//!
//! A fixed, ordered list of case-insensitive regexes applied to the full
//! decoded text of a candidate file; the first match rejects the file with
//! that pattern's reason. This is a substring/regex filter, not a parser and
//! not a security boundary — obfuscated payloads pass, and legitimate code
//! that merely mentions a matched token (say, a comment about `eval(`) is
//! rejected. Keeping it this dumb is deliberate.

use anyhow::{Context, Result};
use regex::Regex;

/// One matcher with its human-readable rejection reason.
#[derive(Debug, Clone)]
pub struct ScanPattern {
    regex: Regex,
    reason: String,
}

impl ScanPattern {
    /// Compile a pattern. Matching is case-insensitive regardless of the
    /// pattern text.
    pub fn new(pattern: &str, reason: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(&format!("(?i){}", pattern))
            .with_context(|| format!("Failed to compile scan pattern '{}'", pattern))?;
        Ok(Self {
            regex,
            reason: reason.into(),
        })
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn matches(&self, content: &str) -> bool {
        self.regex.is_match(content)
    }
}

/// Outcome of scanning one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanVerdict {
    Clean,
    Flagged { reason: String },
}

/// Ordered scanner over a fixed pattern list. Immutable and process-wide
/// after construction.
#[derive(Debug, Clone)]
pub struct PatternScanner {
    patterns: Vec<ScanPattern>,
}

impl PatternScanner {
    pub fn new(patterns: Vec<ScanPattern>) -> Self {
        Self { patterns }
    }

    /// The canonical pattern list: cookie theft, storage wipe, frame escape,
    /// remote script injection, dynamic code evaluation.
    pub fn with_default_patterns() -> Result<Self> {
        let patterns = vec![
            ScanPattern::new(r"document\s*\.\s*cookie", "accesses browser cookies")?,
            ScanPattern::new(
                r"localStorage\s*\.\s*clear\s*\(",
                "clears persistent local storage",
            )?,
            ScanPattern::new(
                r"parent\s*\.\s*location\s*(?:\.\s*href\s*)?=[^=]",
                "navigates the parent frame",
            )?,
            ScanPattern::new(
                r#"<script[^>]*\bsrc\s*=\s*["']?https?://"#,
                "loads a remote script",
            )?,
            ScanPattern::new(r"\beval\s*\(", "calls dynamic code evaluation")?,
        ];
        Ok(Self::new(patterns))
    }

    /// Scan decoded text content. Evaluation stops at the first matching
    /// pattern; its reason becomes the verdict.
    pub fn scan(&self, content: &str) -> ScanVerdict {
        for pattern in &self.patterns {
            if pattern.matches(content) {
                tracing::warn!(reason = %pattern.reason(), "Content scan flagged file");
                return ScanVerdict::Flagged {
                    reason: pattern.reason().to_string(),
                };
            }
        }
        ScanVerdict::Clean
    }

    pub fn is_safe(&self, content: &str) -> bool {
        matches!(self.scan(content), ScanVerdict::Clean)
    }
}
