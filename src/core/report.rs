use crate::core::{CompanyResult, ExecutionSummary};
use std::fmt::Write;
use std::time::Duration;

const BANNER_WIDTH: usize = 60;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `3 min 7.25 sec`
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs_f64();
    let minutes = (total / 60.0).floor();
    format!("{} min {:.2} sec", minutes as u64, total - minutes * 60.0)
}

pub fn render_report(summary: &ExecutionSummary, results: &[CompanyResult]) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    // 寫入 String 不會失敗
    let _ = writeln!(out, "{}", banner);
    let _ = writeln!(out, "EXECUTION SUMMARY");
    let _ = writeln!(out, "{}", banner);
    let _ = writeln!(out, "Start Time: {}", summary.started_at.format(TIMESTAMP_FORMAT));
    let _ = writeln!(out, "End Time: {}", summary.finished_at.format(TIMESTAMP_FORMAT));
    let _ = writeln!(out, "Total Duration: {}", format_duration(summary.elapsed));
    let _ = writeln!(out, "Total Companies Processed: {}", summary.total_tasks);
    let _ = writeln!(out, "Model Used: {}", summary.model);
    let _ = writeln!(out, "{}\n", banner);

    let mut current_country: Option<&str> = None;
    for result in results {
        if current_country != Some(result.country.as_str()) {
            current_country = Some(result.country.as_str());
            let _ = writeln!(out, "\n=== {} ===\n", result.country);
        }
        let _ = writeln!(
            out,
            "{}- {} - {}\n",
            result.ordinal, result.company, result.text
        );
    }

    out
}
