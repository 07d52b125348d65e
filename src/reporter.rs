//! Outcome reporting.

use crate::cloudflare::UpdateOutcome;

/// Verdict of a completed update exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Cloudflare accepted the update.
    Updated,
    /// Cloudflare answered `success: false`; `body` is the raw response.
    Rejected { body: String },
}

impl Report {
    pub fn is_success(&self) -> bool {
        matches!(self, Report::Updated)
    }
}

/// Log the outcome of an update. Never fails.
pub fn report(outcome: &UpdateOutcome) -> Report {
    if outcome.response.success {
        tracing::info!("Record updated successfully");
        Report::Updated
    } else {
        tracing::warn!("Cloudflare returned an error: {}", outcome.raw_body);
        Report::Rejected {
            body: outcome.raw_body.clone(),
        }
    }
}
