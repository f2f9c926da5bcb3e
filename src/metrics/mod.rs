use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Inbound messages and how many commands they held
// - Executed commands and failures by kind
// - Pricing diagnostics
// - Checkout initiations
//
// render() produces the Prometheus text exposition format for whatever
// transport wants to serve it.
// ============================================================================

/// Central metrics registry for the command pipeline
pub struct Metrics {
    registry: Registry,

    pub messages_processed: IntCounter,
    pub messages_unrecognized: IntCounter,
    pub commands_executed: IntCounterVec,
    pub commands_failed: IntCounterVec,
    pub pricing_diagnostics: IntCounter,
    pub checkouts: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let messages_processed = IntCounter::new(
            "orderbot_messages_processed_total",
            "Total inbound messages processed",
        )?;
        registry.register(Box::new(messages_processed.clone()))?;

        let messages_unrecognized = IntCounter::new(
            "orderbot_messages_unrecognized_total",
            "Inbound messages in which no command was recognized",
        )?;
        registry.register(Box::new(messages_unrecognized.clone()))?;

        let commands_executed = IntCounterVec::new(
            Opts::new("orderbot_commands_executed_total", "Commands executed, by kind"),
            &["kind"],
        )?;
        registry.register(Box::new(commands_executed.clone()))?;

        let commands_failed = IntCounterVec::new(
            Opts::new("orderbot_commands_failed_total", "Commands whose execution failed"),
            &["kind"],
        )?;
        registry.register(Box::new(commands_failed.clone()))?;

        let pricing_diagnostics = IntCounter::new(
            "orderbot_pricing_diagnostics_total",
            "Line items or option tokens that could not be priced",
        )?;
        registry.register(Box::new(pricing_diagnostics.clone()))?;

        let checkouts = IntCounterVec::new(
            Opts::new("orderbot_checkouts_total", "Checkout initiations by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(checkouts.clone()))?;

        Ok(Self {
            registry,
            messages_processed,
            messages_unrecognized,
            commands_executed,
            commands_failed,
            pricing_diagnostics,
            checkouts,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record one executed command
    pub fn record_command(&self, kind: &str, success: bool) {
        self.commands_executed.with_label_values(&[kind]).inc();
        if !success {
            self.commands_failed.with_label_values(&[kind]).inc();
        }
    }

    pub fn record_pricing_diagnostics(&self, count: usize) {
        self.pricing_diagnostics.inc_by(count as u64);
    }

    pub fn record_checkout(&self, success: bool) {
        let outcome = if success { "redirected" } else { "failed" };
        self.checkouts.with_label_values(&[outcome]).inc();
    }

    /// Text exposition of every registered metric
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
