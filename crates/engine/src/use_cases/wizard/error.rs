//! Wizard session errors.

use herosmith_domain::DomainError;

/// Errors that can occur while driving a wizard session.
///
/// Validation failures are not errors; they come back as step validations or
/// review reports. These are contract violations.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("No draft has been started")]
    NoDraft,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
