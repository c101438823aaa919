//! Transient user notifications.
//!
//! The UI collaborator shows these as toasts; this crate only decides what
//! to say. File names are user-supplied and the toast body is markup, so
//! they are escaped here.

use ludia_admission::AdmissionReport;
use ludia_core::escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Notification sink. Implementations must be cheap; callers fire
/// notifications inline.
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Default sink: structured log records.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => tracing::info!(%message, "notification"),
            Severity::Success => tracing::info!(%message, kind = "success", "notification"),
            Severity::Error => tracing::warn!(%message, kind = "error", "notification"),
        }
    }
}

/// Surface an admission report: one notification per per-file rejection and
/// one per batch-level reason, so a user uploading five files with two bad
/// extensions sees exactly which two failed and why.
pub fn notify_report(notifier: &dyn Notifier, report: &AdmissionReport) {
    for rejected in &report.rejected {
        // Batch-level reasons are reported once, below, not per file.
        if rejected.reason.is_batch_level() {
            continue;
        }
        notifier.notify(
            Severity::Error,
            &format!("{}: {}", escape(&rejected.file.name), rejected.reason),
        );
    }
    if let Some(batch_reason) = &report.batch_rejection {
        notifier.notify(Severity::Error, &batch_reason.to_string());
    }
}
