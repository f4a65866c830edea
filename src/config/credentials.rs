use crate::domain::ports::CredentialProvider;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_NAME: &str = "GEMINI_API_KEY";
pub const DEFAULT_ENV_FILE: &str = ".env";

const ENV_TEMPLATE: &str =
    "# Add your Google Gemini API key below:\n# GEMINI_API_KEY=your_api_key_here\n";

/// 金鑰解析結果，只有 `Configured` 可以繼續執行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    Configured(String),
    /// 設定檔不存在，已建立範本
    NotConfigured,
    Empty,
    MissingEntry,
}

impl CredentialStatus {
    pub fn api_key(&self) -> Option<&str> {
        match self {
            CredentialStatus::Configured(key) => Some(key),
            _ => None,
        }
    }

    pub fn operator_message(&self, env_file: &Path) -> String {
        let file = env_file.display();
        match self {
            CredentialStatus::Configured(_) => "✅ API key loaded successfully.".to_string(),
            CredentialStatus::NotConfigured => format!(
                "'{}' file created! Please add your Google Gemini API key and re-run.",
                file
            ),
            CredentialStatus::Empty => {
                format!("⚠️ API key is empty. Please fill it in '{}' and re-run.", file)
            }
            CredentialStatus::MissingEntry => format!(
                "⚠️ No valid '{}' entry found in '{}'. Please add it and re-run.",
                API_KEY_NAME, file
            ),
        }
    }
}

/// 從 `.env` 格式檔案讀取 `GEMINI_API_KEY=<value>`
#[derive(Debug, Clone)]
pub struct EnvFileCredentials {
    path: PathBuf,
}

impl EnvFileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for EnvFileCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}

impl CredentialProvider for EnvFileCredentials {
    fn resolve(&self) -> Result<CredentialStatus> {
        if !self.path.exists() {
            fs::write(&self.path, ENV_TEMPLATE)?;
            tracing::info!("📝 Created credential template at {}", self.path.display());
            return Ok(CredentialStatus::NotConfigured);
        }

        let content = fs::read_to_string(&self.path)?;
        Ok(find_api_key(&content))
    }
}

// 第一個符合的行決定結果，即使值是空的
fn find_api_key(content: &str) -> CredentialStatus {
    let prefix = format!("{}=", API_KEY_NAME);

    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .map(|value| match value.trim() {
            "" => CredentialStatus::Empty,
            key => CredentialStatus::Configured(key.to_string()),
        })
        .unwrap_or(CredentialStatus::MissingEntry)
}
