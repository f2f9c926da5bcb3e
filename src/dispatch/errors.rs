use crate::domain::order::OrderParseError;
use crate::domain::report::ReportParseError;
use crate::domain::subscriber::{ProfileError, ProfileField};
use crate::ports::PaymentError;

// ============================================================================
// Command Execution Errors - each becomes one line of the reply
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("error parsing update order command: {0}")]
    OrderParse(#[from] OrderParseError),

    #[error("error parsing new report: {0}")]
    ReportParse(#[from] ReportParseError),

    #[error("error updating {field}: {source}")]
    Profile {
        field: ProfileField,
        source: ProfileError,
    },

    #[error("subscriber not verified, permission denied")]
    NotAuthorized,

    #[error("no current order, add items with: update order X:amount")]
    NoCurrentOrder,

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("unhandled error {action}: {reason}")]
    Store {
        action: &'static str,
        reason: anyhow::Error,
    },
}

impl CommandError {
    pub fn store(action: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |reason| CommandError::Store { action, reason }
    }
}
