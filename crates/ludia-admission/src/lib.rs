//! Upload admission pipeline.
//!
//! Every bundle a user submits passes through this crate before any file
//! reaches storage or the catalog: per-file validation (extension allow-list,
//! size ceiling, duplicate names), a heuristic content-pattern scan of
//! text-decodable files, and a batch-level entry-point requirement. Outcomes
//! are returned as data in an [`AdmissionReport`]; the pipeline is total and
//! never fails for bad input.
//!
//! The scanner is a regex allow/deny filter, not a security boundary: it
//! catches the obvious cases (cookie theft, storage wipe, frame escape,
//! remote script injection, dynamic evaluation) and nothing more. Obfuscated
//! payloads pass; benign code mentioning a matched token is rejected. Both
//! are accepted trade-offs.

pub mod candidate;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod validator;

pub use candidate::{CandidateFile, FileContent};
pub use pipeline::AdmissionPipeline;
pub use report::{AdmissionReport, RejectedFile, RejectionReason};
pub use rules::ValidationRules;
pub use scanner::{PatternScanner, ScanPattern, ScanVerdict};
pub use validator::{BundleValidator, FileVerdict};
