use crate::core::processor::SequentialProcessor;
use crate::core::report::{format_duration, render_report};
use crate::core::{CompanyResult, ExecutionSummary, ParsedCatalog, Sleeper, Storage, TextGenerator};
use crate::utils::error::Result;
use chrono::{DateTime, Local};

/// 一次完整執行的結果
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: String,
    pub summary: ExecutionSummary,
    pub results: Vec<CompanyResult>,
}

/// 串起 攤平 → 逐一處理 → 寫出報表
pub struct InfosearchEngine<G: TextGenerator, S: Sleeper, W: Storage> {
    processor: SequentialProcessor<G, S>,
    storage: W,
    output_file: String,
}

impl<G: TextGenerator, S: Sleeper, W: Storage> InfosearchEngine<G, S, W> {
    pub fn new(
        processor: SequentialProcessor<G, S>,
        storage: W,
        output_file: impl Into<String>,
    ) -> Self {
        Self {
            processor,
            storage,
            output_file: output_file.into(),
        }
    }

    /// `started_at` 應在程式啟動時取得，報表的耗時從那一刻算起
    pub async fn run(
        &self,
        catalog: &ParsedCatalog,
        started_at: DateTime<Local>,
    ) -> Result<RunOutcome> {
        let tasks = catalog.tasks();
        let total = tasks.len();

        let estimate = self.processor.pacing().estimate(total);
        tracing::info!("⏱ Estimated total time: {}", format_duration(estimate));

        let results = self.processor.process(&tasks).await;

        let finished_at = Local::now();
        let summary =
            ExecutionSummary::new(started_at, finished_at, total, self.processor.model());
        let report = render_report(&summary, &results);

        // 報表只在最後一次寫出
        self.storage
            .write_file(&self.output_file, report.as_bytes())
            .await?;

        let failures = results.iter().filter(|r| r.is_error()).count();
        tracing::info!("✅ All responses saved to {}", self.output_file);
        tracing::info!(
            "⏱ Total execution time: {} ({} of {} companies failed)",
            format_duration(summary.elapsed),
            failures,
            total
        );

        Ok(RunOutcome {
            output_path: self.output_file.clone(),
            summary,
            results,
        })
    }
}
