// ============================================================================
// Field Report Domain
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod parser;

pub use value_objects::*;
pub use errors::*;
pub use parser::*;
