// ============================================================================
// orderbot - chat commerce and field reporting over free-text messages
// ============================================================================
//
// message --extract--> commands --dispatch--> one reply
//
// Pricing, parsing and merging are pure. Persistence and payment sit behind
// the traits in `ports`.
//
// ============================================================================

pub mod catalog;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod pricing;
