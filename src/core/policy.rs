use std::time::Duration;

/// 每完成 `requests_per_window` 個請求就冷卻一次，其餘請求之間固定小延遲
#[derive(Debug, Clone, PartialEq)]
pub struct PacingPolicy {
    pub requests_per_window: usize,
    pub cool_down: Duration,
    pub request_delay: Duration,
    /// 只用來估算總時間
    pub average_request: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    CoolDown(Duration),
    Delay(Duration),
}

impl PacingPolicy {
    /// 第 `completed` 個請求完成後要等多久。最後一個任務不冷卻。
    pub fn pause_after(&self, completed: usize, total: usize) -> Pause {
        let window = self.requests_per_window.max(1);
        if completed % window == 0 && completed < total {
            Pause::CoolDown(self.cool_down)
        } else {
            Pause::Delay(self.request_delay)
        }
    }

    /// 預估整批執行時間
    pub fn estimate(&self, total: usize) -> Duration {
        let window = self.requests_per_window.max(1);
        let per_request = self.average_request + self.request_delay;
        let full_windows = (total / window) as u32;
        let remaining = (total % window) as u32;

        (per_request * window as u32 + self.cool_down) * full_windows + per_request * remaining
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            requests_per_window: 15,
            cool_down: Duration::from_secs(60),
            request_delay: Duration::from_secs(1),
            average_request: Duration::from_millis(1500),
        }
    }
}

/// 只有被限流時才重試，每次等待時間加倍
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// 第 `attempt` 次 (從 0 起算) 被限流後的等待時間
    pub fn backoff_for(&self, attempt: usize) -> Duration {
        let factor = 2u32.saturating_pow(attempt as u32);
        self.initial_backoff.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(5),
        }
    }
}
