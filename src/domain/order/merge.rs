use super::value_objects::{LineItem, Order};

// ============================================================================
// Order Merge - overwrite by item id, append the rest, drop "0" amounts
// ============================================================================

/// Merge a batch of proposed updates into existing line items.
///
/// An update for an id already present replaces that entry where it stands.
/// An update for a new id is appended, unless it is a `"0"` deletion, which
/// never adds anything. Entries whose amount is `"0"` are removed once the
/// whole batch has been applied.
pub fn merge_line_items(existing: &[LineItem], updates: &[LineItem]) -> Vec<LineItem> {
    let mut merged = existing.to_vec();

    for update in updates {
        match merged.iter_mut().find(|item| item.item_id == update.item_id) {
            Some(slot) => *slot = update.clone(),
            None if update.is_deletion() => {}
            None => merged.push(update.clone()),
        }
    }

    merged.retain(|item| !item.is_deletion());
    merged
}

impl Order {
    pub fn apply_updates(&mut self, updates: &[LineItem]) {
        self.line_items = merge_line_items(&self.line_items, updates);
    }
}
