// ============================================================================
// Commands - typed intents extracted from free text
// ============================================================================

pub mod command;
pub mod extractor;

pub use command::*;
pub use extractor::*;
