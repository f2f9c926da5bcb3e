// ============================================================================
// Dispatch - runs extracted commands and assembles the reply
// ============================================================================

pub mod conversation;
pub mod dispatcher;
pub mod errors;
pub mod replies;

pub use conversation::*;
pub use dispatcher::*;
pub use errors::*;
