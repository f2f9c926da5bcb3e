use std::fmt;

use crate::domain::order::{LineItem, OrderParseError};
use crate::domain::report::{ReportFields, ReportParseError};
use crate::domain::subscriber::ProfileField;

// ============================================================================
// Commands - one per intent found in an inbound message
// ============================================================================

/// The closed set of `<keyword>?` queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Menu,
    Shop,
    UserInfo,
    CurrentOrder,
    CheckoutNow,
}

impl QueryKind {
    pub const ALL: [QueryKind; 5] = [
        QueryKind::Menu,
        QueryKind::Shop,
        QueryKind::UserInfo,
        QueryKind::CurrentOrder,
        QueryKind::CheckoutNow,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            QueryKind::Menu => "menu?",
            QueryKind::Shop => "shop?",
            QueryKind::UserInfo => "userinfo?",
            QueryKind::CurrentOrder => "currentorder?",
            QueryKind::CheckoutNow => "checkoutnow?",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A recognized command. Order updates and reports are parsed at extraction
/// time; a parse failure is kept on the command so the dispatcher can report
/// it alongside the results of its siblings.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Query {
        raw: String,
        kind: QueryKind,
    },
    UpdateField {
        raw: String,
        field: ProfileField,
        value: String,
    },
    UpdateOrder {
        raw: String,
        items: Result<Vec<LineItem>, OrderParseError>,
    },
    NewReport {
        raw: String,
        fields: Result<ReportFields, ReportParseError>,
    },
}

impl Command {
    /// Short label used for logging and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Query { .. } => "query",
            Command::UpdateField { .. } => "update_field",
            Command::UpdateOrder { .. } => "update_order",
            Command::NewReport { .. } => "new_report",
        }
    }

    /// Text the rule matched, before any parsing
    pub fn raw(&self) -> &str {
        match self {
            Command::Query { raw, .. }
            | Command::UpdateField { raw, .. }
            | Command::UpdateOrder { raw, .. }
            | Command::NewReport { raw, .. } => raw,
        }
    }
}
