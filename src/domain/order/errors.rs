// ============================================================================
// Order Update Parse Errors - any one of these rejects the whole command
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderParseError {
    #[error("failed to parse item '{0}': expected <item number>:<amount>")]
    MissingColon(String),

    #[error("failed to parse item number '{0}'")]
    InvalidItemId(String),

    #[error("no items given, expected update order <item number>:<amount>")]
    NoItems,
}
