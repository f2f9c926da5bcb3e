// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each concern has its own subdirectory with:
// - Value objects
// - Errors
// - Parsing / reconciliation logic
//
// Nothing here touches storage; see src/ports/ for that.
//
// ============================================================================

pub mod order;
pub mod report;
pub mod subscriber;
