use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use orderbot::catalog::{CatalogLoader, DemoCatalogLoader, JsonCatalogLoader};
use orderbot::config::BotConfig;
use orderbot::dispatch::{Dispatcher, Services};
use orderbot::metrics::Metrics;
use orderbot::ports::{
    InMemoryOrderStore, InMemoryReportSink, InMemorySubscriberStore, RedirectPaymentInitiator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO, override with RUST_LOG (e.g. RUST_LOG=orderbot=trace).
    // Logs go to stderr so stdout carries only replies.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,orderbot=debug")),
        )
        .init();

    tracing::info!("🚀 Starting orderbot demo");

    // === 1. Configuration ===
    let config = BotConfig::from_env().context("reading ORDERBOT_* configuration")?;
    tracing::info!(
        catalog_id = %config.catalog_id,
        reports_enabled = config.reports_enabled,
        "⚙️  Configuration loaded"
    );

    // === 2. Catalog ===
    let catalog = match &config.catalog_file {
        Some(path) => JsonCatalogLoader::new(path).load(),
        None => DemoCatalogLoader {
            catalog_id: config.catalog_id.clone(),
            preamble: config.price_list_preamble.clone(),
        }
        .load(),
    }
    .context("loading catalog")?;
    tracing::info!("🛒 Catalog '{}' ready with {} items", catalog.id(), catalog.items().count());

    // === 3. Ports and metrics ===
    let metrics = Arc::new(Metrics::new()?);
    let reports = Arc::new(InMemoryReportSink::new());
    let services = Services::new(
        Arc::new(catalog),
        Arc::new(InMemoryOrderStore::new()),
        Arc::new(InMemorySubscriberStore::new()),
        reports.clone(),
        Arc::new(RedirectPaymentInitiator::new(config.checkout.clone())),
    )
    .with_metrics(metrics.clone());

    let dispatcher = Dispatcher::new(services, &config).context("building command rules")?;

    // === 4. Conversation loop ===
    tracing::info!("📨 Reading <subscriber>|<message> lines from stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some((subscriber_id, message)) = line.split_once('|') else {
            if !line.trim().is_empty() {
                tracing::warn!(line = %line, "Skipping line without '|' separator");
            }
            continue;
        };

        // Messages are handled one at a time, so per-subscriber ordering holds.
        match dispatcher.respond(subscriber_id.trim(), message).await {
            Ok(reply) => println!("{}\n---", reply),
            Err(e) => tracing::error!(subscriber = %subscriber_id, error = %e, "Failed to process message"),
        }
    }

    tracing::info!(
        "📊 Processed {} messages, {} reports stored",
        metrics.messages_processed.get(),
        reports.reports().await.len()
    );
    tracing::debug!("{}", metrics.render()?);
    tracing::info!("🎉 Demo complete!");

    Ok(())
}
