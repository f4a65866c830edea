use crate::core::policy::{PacingPolicy, Pause, RetryPolicy};
use crate::core::prompt::build_prompt;
use crate::core::{CompanyResult, CompanyTask, Sleeper, TaskOutcome, TextGenerator};

/// 逐一處理任務：一次只送一個請求，結果依任務順序保存
pub struct SequentialProcessor<G: TextGenerator, S: Sleeper> {
    generator: G,
    sleeper: S,
    model: String,
    pacing: PacingPolicy,
    retry: RetryPolicy,
}

impl<G: TextGenerator, S: Sleeper> SequentialProcessor<G, S> {
    pub fn new(generator: G, sleeper: S, model: impl Into<String>) -> Self {
        Self {
            generator,
            sleeper,
            model: model.into(),
            pacing: PacingPolicy::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn pacing(&self) -> &PacingPolicy {
        &self.pacing
    }

    pub async fn process(&self, tasks: &[CompanyTask]) -> Vec<CompanyResult> {
        let total = tasks.len();
        let mut results = Vec::with_capacity(total);

        for (index, task) in tasks.iter().enumerate() {
            tracing::info!(
                "Processing {}: Company {}/{} - {}",
                task.country,
                task.ordinal,
                total,
                task.company
            );

            let outcome = self.run_task(task).await;
            match &outcome {
                TaskOutcome::Succeeded(_) => tracing::debug!("✅ {} described", task.company),
                TaskOutcome::Failed(e) => tracing::error!("❌ {} failed: {}", task.company, e),
                TaskOutcome::RetriesExhausted => {
                    tracing::error!(
                        "❌ {} gave up after {} attempts",
                        task.company,
                        self.retry.max_attempts
                    )
                }
            }
            results.push(outcome.into_result(task));

            let completed = index + 1;
            match self.pacing.pause_after(completed, total) {
                Pause::CoolDown(duration) => {
                    tracing::info!(
                        "⏱ {} requests completed. Waiting {}s for rate limit...",
                        completed,
                        duration.as_secs()
                    );
                    self.sleeper.sleep(duration).await;
                }
                Pause::Delay(duration) => self.sleeper.sleep(duration).await,
            }
        }

        results
    }

    /// 單一任務的狀態機：限流則退避後重試，其他錯誤立即結束。
    /// 每次限流都會退避，包含最後一次嘗試。
    pub async fn run_task(&self, task: &CompanyTask) -> TaskOutcome {
        let prompt = build_prompt(task);

        for attempt in 0..self.retry.max_attempts {
            match self.generator.generate(&self.model, &prompt).await {
                Ok(text) => return TaskOutcome::Succeeded(text.trim().to_string()),
                Err(e) if e.is_rate_limited() => {
                    let backoff = self.retry.backoff_for(attempt);
                    tracing::warn!(
                        "⚠️ 429 Too Many Requests for {}, retrying in {}s...",
                        task.company,
                        backoff.as_secs()
                    );
                    self.sleeper.sleep(backoff).await;
                }
                Err(e) => return TaskOutcome::Failed(e),
            }
        }

        TaskOutcome::RetriesExhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::GenerationError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    enum Reply {
        Text(&'static str),
        RateLimited,
        ServerError,
    }

    /// 依序回放預設回應，並記錄收到的提示詞
    struct ScriptedGenerator {
        replies: Mutex<VecDeque<Reply>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl<'a> TextGenerator for &'a ScriptedGenerator {
        async fn generate(&self, _model: &str, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.replies.lock().unwrap().pop_front() {
                Some(Reply::Text(text)) => Ok(text.to_string()),
                Some(Reply::RateLimited) => Err(GenerationError::RateLimited {
                    message: "quota exceeded".to_string(),
                }),
                Some(Reply::ServerError) => Err(GenerationError::Api {
                    status: 500,
                    message: "internal".to_string(),
                }),
                None => Ok("\"default\" | [Other]".to_string()),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSleeper {
        sleeps: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn recorded(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl<'a> Sleeper for &'a RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
        }
    }

    fn task(ordinal: usize, company: &str) -> CompanyTask {
        CompanyTask {
            ordinal,
            country: "Argentina".to_string(),
            company: company.to_string(),
        }
    }

    #[tokio::test]
    async fn test_rate_limited_twice_then_success() {
        let generator = ScriptedGenerator::new(vec![
            Reply::RateLimited,
            Reply::RateLimited,
            Reply::Text("  \"Alpha makes widgets\" | [Manufacturing]  "),
        ]);
        let sleeper = RecordingSleeper::default();
        let processor = SequentialProcessor::new(&generator, &sleeper, "test-model");

        let outcome = processor.run_task(&task(1, "Alpha Corp")).await;

        match outcome {
            TaskOutcome::Succeeded(text) => {
                assert_eq!(text, "\"Alpha makes widgets\" | [Manufacturing]")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(generator.calls(), 3);
        assert_eq!(
            sleeper.recorded(),
            vec![Duration::from_secs(5), Duration::from_secs(10)]
        );
    }

    #[tokio::test]
    async fn test_other_error_is_not_retried() {
        let generator = ScriptedGenerator::new(vec![Reply::ServerError, Reply::Text("never")]);
        let sleeper = RecordingSleeper::default();
        let processor = SequentialProcessor::new(&generator, &sleeper, "test-model");

        let results = processor.process(&[task(1, "Alpha Corp")]).await;

        assert_eq!(generator.calls(), 1);
        assert!(results[0].text.starts_with("ERROR:"));
        assert!(results[0].text.contains("500"));
        // 只有請求之間的固定延遲
        assert_eq!(sleeper.recorded(), vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let generator = ScriptedGenerator::new(vec![
            Reply::RateLimited,
            Reply::RateLimited,
            Reply::RateLimited,
            Reply::Text("too late"),
        ]);
        let sleeper = RecordingSleeper::default();
        let processor = SequentialProcessor::new(&generator, &sleeper, "test-model");

        let results = processor.process(&[task(1, "Alpha Corp")]).await;

        assert_eq!(generator.calls(), 3);
        assert_eq!(results[0].text, "ERROR: Too many retries for Alpha Corp");
        assert_eq!(
            sleeper.recorded(),
            vec![
                Duration::from_secs(5),
                Duration::from_secs(10),
                Duration::from_secs(20),
                Duration::from_secs(1)
            ]
        );
    }

    #[tokio::test]
    async fn test_single_cool_down_across_sixteen_tasks() {
        let generator = ScriptedGenerator::new(vec![]);
        let sleeper = RecordingSleeper::default();
        let processor = SequentialProcessor::new(&generator, &sleeper, "test-model");
        let tasks: Vec<CompanyTask> = (1..=16).map(|i| task(i, &format!("Company {}", i))).collect();

        let results = processor.process(&tasks).await;

        assert_eq!(results.len(), 16);
        let sleeps = sleeper.recorded();
        assert_eq!(sleeps.len(), 16);
        let cool_downs: Vec<usize> = sleeps
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == Duration::from_secs(60))
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(cool_downs, vec![15]);
    }

    #[tokio::test]
    async fn test_results_keep_task_order_with_mixed_outcomes() {
        let generator = ScriptedGenerator::new(vec![
            Reply::Text("first"),
            Reply::ServerError,
            Reply::RateLimited,
            Reply::Text("third"),
        ]);
        let sleeper = RecordingSleeper::default();
        let processor = SequentialProcessor::new(&generator, &sleeper, "test-model")
            .with_retry(RetryPolicy {
                max_attempts: 3,
                initial_backoff: Duration::from_millis(10),
            });
        let tasks = vec![task(1, "A"), task(2, "B"), task(3, "C")];

        let results = processor.process(&tasks).await;

        let ordinals: Vec<usize> = results.iter().map(|r| r.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
        assert_eq!(results[0].text, "first");
        assert!(results[1].is_error());
        assert_eq!(results[2].text, "third");
        assert_eq!(sleeper.recorded()[2], Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_prompt_is_sent_with_company_details() {
        let generator = ScriptedGenerator::new(vec![Reply::Text("ok")]);
        let sleeper = RecordingSleeper::default();
        let processor = SequentialProcessor::new(&generator, &sleeper, "test-model");

        processor.run_task(&task(7, "Beta Inc")).await;

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("Beta Inc in Argentina"));
    }
}
