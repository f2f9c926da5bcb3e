use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::errors::CatalogError;

// ============================================================================
// Catalog Value Objects
// ============================================================================

/// How an item's option strings are turned into a price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingRegime {
    /// Each option embeds a fixed price (`... @ R<price>`), bought by index
    EnumeratedOption,
    /// Each option embeds a minimum weight and a unit price (`<min>g @ R<price>`)
    WeightTiered,
    /// Anything the loader did not recognize; priced as zero with a diagnostic
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub catalog_id: String,
    pub item_id: u32,
    pub name: String,
    pub regime: PricingRegime,
    #[serde(default)]
    pub options: Vec<String>,
}

/// A display section of the catalog. Item order is preserved from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSelection {
    pub preamble: String,
    pub items: Vec<CatalogItem>,
}

impl CatalogSelection {
    pub fn new(preamble: impl Into<String>, items: Vec<CatalogItem>) -> Self {
        Self {
            preamble: preamble.into(),
            items,
        }
    }
}

/// Read-only price list shared by every conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    id: String,
    preamble: String,
    selections: Vec<CatalogSelection>,
}

impl Catalog {
    /// Build a catalog, rejecting item ids that appear more than once
    /// across all selections.
    pub fn new(
        id: impl Into<String>,
        preamble: impl Into<String>,
        selections: Vec<CatalogSelection>,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in selections.iter().flat_map(|s| s.items.iter()) {
            if !seen.insert(item.item_id) {
                return Err(CatalogError::DuplicateItemId(item.item_id));
            }
        }

        Ok(Self {
            id: id.into(),
            preamble: preamble.into(),
            selections,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn selections(&self) -> &[CatalogSelection] {
        &self.selections
    }

    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.selections.iter().flat_map(|s| s.items.iter())
    }

    pub fn find_item(&self, item_id: u32) -> Option<&CatalogItem> {
        self.items().find(|item| item.item_id == item_id)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
