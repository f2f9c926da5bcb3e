use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::report::Report;

/// Where accepted field reports go
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn submit(&self, report: &Report) -> Result<()>;
}

#[derive(Default)]
pub struct InMemoryReportSink {
    reports: RwLock<Vec<Report>>,
}

impl InMemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reports(&self) -> Vec<Report> {
        self.reports.read().await.clone()
    }
}

#[async_trait]
impl ReportSink for InMemoryReportSink {
    async fn submit(&self, report: &Report) -> Result<()> {
        self.reports.write().await.push(report.clone());
        tracing::debug!(report_id = %report.report_id, "Report stored");
        Ok(())
    }
}
