use crate::config::credentials::CredentialStatus;
use crate::utils::error::{GenerationError, Result};
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 文字生成服務：輸入模型名稱與提示詞，回傳一段文字
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, GenerationError>;
}

/// 所有等待都經過這裡，測試時可以記錄而不真的睡
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// API 金鑰來源
pub trait CredentialProvider {
    fn resolve(&self) -> Result<CredentialStatus>;
}
