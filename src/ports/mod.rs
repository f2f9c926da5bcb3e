// ============================================================================
// Ports - narrow interfaces to everything outside the core
// ============================================================================
//
// Stores and sinks return anyhow::Result; their failures are surfaced to the
// caller unmodified and never retried here. In-memory implementations back
// the demo binary and the tests.
//
// ============================================================================

pub mod order_store;
pub mod subscriber_store;
pub mod report_sink;
pub mod payment;

pub use order_store::*;
pub use subscriber_store::*;
pub use report_sink::*;
pub use payment::*;
