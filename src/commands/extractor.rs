use std::sync::LazyLock;

use regex::Regex;

use crate::domain::order::parse_order_update;
use crate::domain::report::parse_report;
use crate::domain::subscriber::ProfileField;

use super::command::{Command, QueryKind};

// ============================================================================
// Command Extractor
// ============================================================================
//
// Every rule runs over the whole lower-cased message and may match many
// times. Rules never exclude each other. Commands come out grouped by rule:
// queries, field updates, order updates, then reports.
//
// ============================================================================

pub const DEFAULT_REPORT_KEYWORD: &str = "new sighting";

static QUERY_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(menu\?|shop\?|userinfo\?|currentorder\?|checkoutnow\?)").expect("query rule")
});

static FIELD_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"update (email|nickname|social|consent):\s*(\S*)").expect("field rule")
});

static ORDER_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"update order:?\s*(.*)").expect("order rule"));

static DEFAULT_EXTRACTOR: LazyLock<CommandExtractor> = LazyLock::new(CommandExtractor::default);

/// Extract commands with the default report keyword
pub fn extract(message: &str) -> Vec<Command> {
    DEFAULT_EXTRACTOR.extract(message)
}

#[derive(Debug, Clone)]
pub struct CommandExtractor {
    report_rule: Option<Regex>,
}

impl CommandExtractor {
    /// `report_keyword` of `None` switches the report rule off.
    pub fn new(report_keyword: Option<&str>) -> Result<Self, regex::Error> {
        let report_rule = report_keyword
            .map(|keyword| {
                Regex::new(&format!(
                    r"{}:?\s*(.*)",
                    regex::escape(&keyword.trim().to_lowercase())
                ))
            })
            .transpose()?;

        Ok(Self { report_rule })
    }

    pub fn extract(&self, message: &str) -> Vec<Command> {
        let message = message.to_lowercase();
        let mut commands = Vec::new();

        for caps in QUERY_RULE.captures_iter(&message) {
            if let Some(kind) = QueryKind::from_keyword(&caps[1]) {
                commands.push(Command::Query {
                    raw: caps[0].to_string(),
                    kind,
                });
            }
        }

        for caps in FIELD_RULE.captures_iter(&message) {
            if let Ok(field) = ProfileField::from_keyword(&caps[1]) {
                commands.push(Command::UpdateField {
                    raw: caps[0].to_string(),
                    field,
                    value: caps[2].to_string(),
                });
            }
        }

        for caps in ORDER_RULE.captures_iter(&message) {
            commands.push(Command::UpdateOrder {
                raw: caps[0].to_string(),
                items: parse_order_update(&caps[1]),
            });
        }

        if let Some(rule) = &self.report_rule {
            for caps in rule.captures_iter(&message) {
                commands.push(Command::NewReport {
                    raw: caps[0].to_string(),
                    fields: parse_report(&caps[1]),
                });
            }
        }

        tracing::debug!(commands = commands.len(), "Extracted commands from message");
        commands
    }
}

impl Default for CommandExtractor {
    fn default() -> Self {
        Self::new(Some(DEFAULT_REPORT_KEYWORD)).expect("escaped report keyword is a valid pattern")
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
