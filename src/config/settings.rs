use crate::core::policy::{PacingPolicy, RetryPolicy};
use crate::utils::error::{InfosearchError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_OUTPUT: &str = "gemini_log.txt";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model: ModelConfig,
    pub pacing: PacingConfig,
    pub retry: RetryConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub requests_per_window: u64,
    pub cool_down_seconds: u64,
    pub request_delay_seconds: u64,
    pub average_request_seconds: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 15,
            cool_down_seconds: 60,
            request_delay_seconds: 1,
            average_request_seconds: 1.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u64,
    pub initial_backoff_seconds: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT.to_string(),
        }
    }
}

impl Settings {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InfosearchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InfosearchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_MODEL})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InfosearchError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 有設定檔就讀，沒有就用預設值
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("📁 Loading settings from: {}", path);
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn pacing_policy(&self) -> PacingPolicy {
        PacingPolicy {
            requests_per_window: self.pacing.requests_per_window as usize,
            cool_down: Duration::from_secs(self.pacing.cool_down_seconds),
            request_delay: Duration::from_secs(self.pacing.request_delay_seconds),
            average_request: Duration::try_from_secs_f64(self.pacing.average_request_seconds)
                .unwrap_or_default(),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry.max_attempts as usize,
            initial_backoff: Duration::from_secs(self.retry.initial_backoff_seconds),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.model.timeout_seconds)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("model.name", &self.model.name)?;
        validation::validate_url("model.endpoint", &self.model.endpoint)?;
        validation::validate_positive_number("model.timeout_seconds", self.model.timeout_seconds, 1)?;
        validation::validate_positive_number(
            "pacing.requests_per_window",
            self.pacing.requests_per_window,
            1,
        )?;
        validation::validate_range(
            "pacing.average_request_seconds",
            self.pacing.average_request_seconds,
            0.0,
            3600.0,
        )?;
        validation::validate_positive_number("retry.max_attempts", self.retry.max_attempts, 1)?;
        validation::validate_path("output.path", &self.output.path)?;
        Ok(())
    }
}
