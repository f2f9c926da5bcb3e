use super::value_objects::{Catalog, CatalogItem, CatalogSelection};

// ============================================================================
// Catalog Rendering - plain text listings sent back over chat
// ============================================================================

impl CatalogItem {
    /// `<id>: <name>` followed by a one-based numbered option list
    pub fn render(&self) -> String {
        let mut text = format!("{}: {}\n", self.item_id, self.name);
        for (i, option) in self.options.iter().enumerate() {
            text.push_str(&format!("   {}. {}\n", i + 1, option));
        }
        text.push('\n');
        text
    }
}

impl CatalogSelection {
    pub fn render(&self) -> String {
        let mut text = format!("{}\n", self.preamble);
        for item in &self.items {
            text.push_str(&item.render());
        }
        text
    }
}

impl Catalog {
    /// Catalog preamble, then every selection in order separated by a blank line.
    pub fn render(&self) -> String {
        let selections: Vec<String> = self.selections().iter().map(|s| s.render()).collect();
        format!("{}\n\n{}", self.preamble(), selections.join("\n"))
    }
}
