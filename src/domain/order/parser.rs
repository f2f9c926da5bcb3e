use std::sync::LazyLock;

use regex::Regex;

use super::errors::OrderParseError;
use super::value_objects::LineItem;

// ============================================================================
// Order Update Parser
// ============================================================================
//
// "1:2x3, 4x1, 9:500, 3:0" becomes
//   [(1, "2x3, 4x1"), (9, "500"), (3, "0")]
//
// Enumerated runs (<id>:<opt>x<qty>[,<opt>x<qty>...]) are lifted out first
// because their amounts contain commas. Whatever is left is split on commas
// into plain <id>:<amount> pairs.
//
// ============================================================================

static ENUMERATED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d+):\s*(\d+x\d+(?:\s*,\s*\d+x\d+)*)").expect("enumerated run pattern")
});

const COMMAND_PREFIX: &str = "update order";

pub fn parse_order_update(text: &str) -> Result<Vec<LineItem>, OrderParseError> {
    let text = text.trim();
    let text = text.strip_prefix(COMMAND_PREFIX).unwrap_or(text);
    let text = text.trim_start();
    let text = text.strip_prefix(':').unwrap_or(text).trim();

    let mut line_items = Vec::new();

    for caps in ENUMERATED_RUN.captures_iter(text) {
        line_items.push(LineItem::new(parse_item_id(&caps[1])?, caps[2].trim()));
    }

    // Matched runs are replaced by a separator so their neighbours stay apart.
    let remainder = ENUMERATED_RUN.replace_all(text, ",");

    for pair in remainder.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        line_items.push(parse_pair(pair)?);
    }

    if line_items.is_empty() {
        return Err(OrderParseError::NoItems);
    }

    Ok(line_items)
}

fn parse_pair(pair: &str) -> Result<LineItem, OrderParseError> {
    let (id, amount) = pair
        .split_once(':')
        .ok_or_else(|| OrderParseError::MissingColon(pair.to_string()))?;

    Ok(LineItem::new(parse_item_id(id)?, amount.trim()))
}

fn parse_item_id(id: &str) -> Result<u32, OrderParseError> {
    let id = id.trim();
    id.parse()
        .map_err(|_| OrderParseError::InvalidItemId(id.to_string()))
}
