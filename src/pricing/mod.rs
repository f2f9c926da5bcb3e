// ============================================================================
// Pricing - totals for enumerated-option and weight-tiered items
// ============================================================================

pub mod errors;
pub mod engine;

pub use errors::*;
pub use engine::*;
