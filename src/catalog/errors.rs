// ============================================================================
// Catalog Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog item id {0} appears more than once")]
    DuplicateItemId(u32),

    #[error("Malformed catalog file: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
}
