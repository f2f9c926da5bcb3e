use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::CatalogError;
use super::value_objects::{Catalog, CatalogItem, CatalogSelection, PricingRegime};

// ============================================================================
// Catalog Loading
// ============================================================================
//
// Catalog rows arrive flat, each tagged with the selection it is listed
// under. Contiguous runs sharing a label become one selection; a label that
// reappears after a different one starts a new selection.
//
// ============================================================================

/// One flat catalog row as stored in a row store or JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub selection: String,
    #[serde(flatten)]
    pub item: CatalogItem,
}

/// On-disk catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub id: String,
    #[serde(default)]
    pub preamble: String,
    pub rows: Vec<CatalogRow>,
}

/// Source of the process-wide catalog
pub trait CatalogLoader {
    fn load(&self) -> Result<Catalog, CatalogError>;
}

/// Group contiguous rows with the same label into selections, keeping input order.
pub fn group_selections(rows: impl IntoIterator<Item = CatalogRow>) -> Vec<CatalogSelection> {
    let mut selections: Vec<CatalogSelection> = Vec::new();

    for row in rows {
        match selections.last_mut() {
            Some(current) if current.preamble == row.selection => current.items.push(row.item),
            _ => selections.push(CatalogSelection::new(row.selection, vec![row.item])),
        }
    }

    selections
}

impl CatalogFile {
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        Catalog::new(self.id, self.preamble, group_selections(self.rows))
    }
}

pub fn parse_catalog_json(json: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = serde_json::from_str(json)?;
    file.into_catalog()
}

/// Loads a [`CatalogFile`] from disk
pub struct JsonCatalogLoader {
    path: PathBuf,
}

impl JsonCatalogLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogLoader for JsonCatalogLoader {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let json = std::fs::read_to_string(&self.path)?;
        let catalog = parse_catalog_json(&json)?;
        tracing::info!(
            path = %self.path.display(),
            items = catalog.items().count(),
            "Loaded catalog file"
        );
        Ok(catalog)
    }
}

/// Built-in price list used by the demo binary
pub struct DemoCatalogLoader {
    pub catalog_id: String,
    pub preamble: String,
}

impl CatalogLoader for DemoCatalogLoader {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let row = |selection: &str, item_id: u32, name: &str, regime: PricingRegime, options: &[&str]| {
            CatalogRow {
                selection: selection.to_string(),
                item: CatalogItem {
                    catalog_id: self.catalog_id.clone(),
                    item_id,
                    name: name.to_string(),
                    regime,
                    options: options.iter().map(|o| o.to_string()).collect(),
                },
            }
        };

        let rows = vec![
            row(
                "Gardening:",
                1,
                "Rusty Garden Spade",
                PricingRegime::EnumeratedOption,
                &["Gold plated @ R450", "Chrome plated @ R180", "Wrought iron @ R95"],
            ),
            row(
                "Gardening:",
                2,
                "Bent Garden Fork",
                PricingRegime::EnumeratedOption,
                &["With handle @ R60", "Without handle @ R35"],
            ),
            row(
                "Gardening:",
                3,
                "Potting Compost",
                PricingRegime::WeightTiered,
                &["100g @ R3", "500g @ R2", "1000g @ R1"],
            ),
            row(
                "Kitchen:",
                7,
                "Microwave",
                PricingRegime::EnumeratedOption,
                &["5L @ R1200", "7L @ R1500"],
            ),
            row(
                "Kitchen:",
                9,
                "Coffee Beans",
                PricingRegime::WeightTiered,
                &["250g @ R4", "1000g @ R3"],
            ),
            row("DIY:", 10, "Drill", PricingRegime::EnumeratedOption, &["Ryobi @ R899"]),
            row(
                "Books:",
                13,
                "Lord of the Flies",
                PricingRegime::EnumeratedOption,
                &["Paperback @ R150", "Hardcover @ R320"],
            ),
        ];

        Catalog::new(self.catalog_id.clone(), self.preamble.clone(), group_selections(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(selection: &str, item_id: u32) -> CatalogRow {
        CatalogRow {
            selection: selection.to_string(),
            item: CatalogItem {
                catalog_id: "test".to_string(),
                item_id,
                name: format!("Item {}", item_id),
                regime: PricingRegime::EnumeratedOption,
                options: vec![],
            },
        }
    }

    fn ids(selection: &CatalogSelection) -> Vec<u32> {
        selection.items.iter().map(|i| i.item_id).collect()
    }

    #[test]
    fn test_group_contiguous_runs() {
        let selections = group_selections(vec![row("A", 1), row("A", 2), row("B", 3)]);

        assert_eq!(selections.len(), 2);
        assert_eq!(selections[0].preamble, "A");
        assert_eq!(ids(&selections[0]), vec![1, 2]);
        assert_eq!(ids(&selections[1]), vec![3]);
    }

    #[test]
    fn test_reappearing_label_starts_new_selection() {
        let selections = group_selections(vec![row("A", 1), row("B", 2), row("A", 3)]);

        let preambles: Vec<&str> = selections.iter().map(|s| s.preamble.as_str()).collect();
        assert_eq!(preambles, vec!["A", "B", "A"]);
        assert_eq!(ids(&selections[2]), vec![3]);
    }

    #[test]
    fn test_empty_input_yields_no_selections() {
        assert!(group_selections(Vec::new()).is_empty());
    }

    #[test]
    fn test_parse_catalog_json() {
        let json = r#"{
            "id": "shop",
            "preamble": "Welcome",
            "rows": [
                {"selection": "Tea:", "catalog_id": "shop", "item_id": 4, "name": "Rooibos",
                 "regime": "WeightTiered", "options": ["100g @ R2"]},
                {"selection": "Tea:", "catalog_id": "shop", "item_id": 5, "name": "Mug",
                 "regime": "EnumeratedOption", "options": ["Blue @ R40"]}
            ]
        }"#;

        let catalog = parse_catalog_json(json).unwrap();
        assert_eq!(catalog.id(), "shop");
        assert_eq!(catalog.selections().len(), 1);
        assert_eq!(catalog.find_item(4).unwrap().regime, PricingRegime::WeightTiered);
    }

    #[test]
    fn test_json_loader_reads_file() {
        let path = std::env::temp_dir().join(format!("orderbot-catalog-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"{"id": "shop", "preamble": "Welcome", "rows": [
                {"selection": "Tea:", "catalog_id": "shop", "item_id": 4, "name": "Rooibos",
                 "regime": "WeightTiered", "options": ["100g @ R2"]},
                {"selection": "Cups:", "catalog_id": "shop", "item_id": 5, "name": "Mug",
                 "regime": "EnumeratedOption", "options": ["Blue @ R40"]}
            ]}"#,
        )
        .unwrap();

        let catalog = JsonCatalogLoader::new(&path).load().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(catalog.id(), "shop");
        assert_eq!(catalog.preamble(), "Welcome");
        let preambles: Vec<&str> = catalog.selections().iter().map(|s| s.preamble.as_str()).collect();
        assert_eq!(preambles, vec!["Tea:", "Cups:"]);
    }

    #[test]
    fn test_json_loader_missing_file() {
        let path = std::env::temp_dir().join(format!("orderbot-absent-{}.json", uuid::Uuid::new_v4()));
        assert!(matches!(JsonCatalogLoader::new(&path).load(), Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_parse_catalog_json_rejects_garbage() {
        assert!(matches!(parse_catalog_json("{"), Err(CatalogError::Malformed(_))));
    }

    #[test]
    fn test_demo_catalog_loads() {
        let catalog = DemoCatalogLoader {
            catalog_id: "demo".to_string(),
            preamble: "Shop".to_string(),
        }
        .load()
        .unwrap();

        assert_eq!(catalog.selections().len(), 4);
        assert!(catalog.find_item(13).is_some());
    }
}
