// ============================================================================
// Order Domain
// ============================================================================
//
// - Value objects (LineItem, Order)
// - Update parser (free text -> line items, all-or-nothing)
// - Merge (overwrite by item id, append, "0" deletes)
// - Errors (OrderParseError)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod parser;
pub mod merge;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use parser::*;
pub use merge::*;
