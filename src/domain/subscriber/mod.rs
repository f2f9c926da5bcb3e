// ============================================================================
// Subscriber Domain - the person behind a phone number
// ============================================================================

pub mod value_objects;
pub mod errors;

pub use value_objects::*;
pub use errors::*;
