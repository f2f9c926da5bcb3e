// ============================================================================
// Catalog - the immutable price list
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod render;
pub mod loader;

pub use value_objects::*;
pub use errors::*;
pub use loader::*;
