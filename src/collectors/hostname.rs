//! Hostname collector.
//!
//! The only collector whose failure is fatal: every other fact is optional
//! decoration, but a report without a host identity is meaningless.

use crate::error::AuditError;

/// Returns the system's configured hostname.
pub fn read_hostname() -> Result<String, AuditError> {
    let name = nix::unistd::gethostname().map_err(AuditError::Hostname)?;
    Ok(name.to_string_lossy().into_owned())
}
