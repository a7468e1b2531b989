//! Error types for the audit pipeline.

use thiserror::Error;

/// Failures that can escape the collect/render/deliver pipeline.
///
/// Only `Hostname` aborts report generation; the mail variants surface from
/// the optional delivery step and are handled non-fatally by the caller.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The one fatal collection error: a report without a host identity is
    /// meaningless, so this aborts the run.
    #[error("failed to determine hostname: {0}")]
    Hostname(#[source] nix::Error),

    #[error("mail configuration incomplete: {0}")]
    MailConfig(String),

    #[error("invalid mail address: {0}")]
    MailAddress(#[from] lettre::address::AddressError),

    #[error("failed to build mail message: {0}")]
    MailMessage(#[from] lettre::error::Error),

    #[error("mail delivery failed: {0}")]
    MailTransport(#[from] lettre::transport::smtp::Error),
}
