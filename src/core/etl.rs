use crate::core::Pipeline;
use crate::domain::model::RunReport;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&mut self) -> Result<RunReport> {
        tracing::info!("🚀 Starting roster ETL process...");

        // Extract
        let entries = self.pipeline.extract().await?;
        tracing::info!("📋 Extracted {} musicians from the roster page", entries.len());

        // Transform
        let roster = self.pipeline.transform(entries).await?;

        // Load
        let report = self.pipeline.load(roster).await?;
        tracing::info!(
            "✅ {} musicians of {} places confirmed",
            report.summary.total,
            report.summary.settings.capacity
        );

        Ok(report)
    }
}
