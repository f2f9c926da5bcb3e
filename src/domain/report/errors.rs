use std::fmt;

// ============================================================================
// Field Report Parse Errors - each names the stage that failed
// ============================================================================

/// Which bracketed segment was being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Address,
    CurrentActivity,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Address => write!(f, "address"),
            Segment::CurrentActivity => write!(f, "current activity"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportParseError {
    #[error("no '[' found for the {0}")]
    MissingOpeningBracket(Segment),

    #[error("no ']' found after the {0} '['")]
    MissingClosingBracket(Segment),

    #[error("']' found before '[' for the {0}")]
    MisorderedBrackets(Segment),

    #[error("expected tribe size and activity level, found {0} comma separated fields")]
    FieldCount(usize),

    #[error("invalid tribe size '{0}', use small, medium or large")]
    InvalidTribeSize(String),

    #[error("invalid activity level '{0}', use low, medium or high")]
    InvalidActivityLevel(String),
}
