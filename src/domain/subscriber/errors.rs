// ============================================================================
// Subscriber Profile Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Invalid consent value '{0}', use yes or no")]
    InvalidConsent(String),

    #[error("Unknown profile field: {0}")]
    UnknownField(String),
}
