pub mod credentials;
pub mod settings;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "company-infosearcher")]
#[command(about = "Company AI Infosearcher - describes companies per country with Google Gemini")]
#[command(override_usage = "company-infosearcher --file [your_text_file.txt]")]
pub struct CliConfig {
    /// Specify the text file to process.
    #[arg(short, long)]
    pub file: Option<String>,

    /// Optional TOML settings file (model, pacing, retry, output)
    #[arg(long)]
    pub config: Option<String>,

    /// File holding GEMINI_API_KEY=<value>
    #[arg(long, default_value = credentials::DEFAULT_ENV_FILE)]
    pub env_file: String,

    /// Report file, overrides [output].path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Model identifier, overrides [model].name
    #[arg(long)]
    pub model: Option<String>,

    /// Parse the input and print the plan without calling the API
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// `--file` 檢查的結果，決定程式要不要往下執行
#[cfg(feature = "cli")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFile {
    /// 沒給 `--file`，印出說明後結束
    Unspecified,
    NotFound(PathBuf),
    Found(PathBuf),
}

#[cfg(feature = "cli")]
impl InputFile {
    pub fn operator_message(&self) -> Option<String> {
        match self {
            InputFile::Unspecified => None,
            InputFile::NotFound(path) => Some(format!("❌ File not found: {}", path.display())),
            InputFile::Found(path) => Some(format!("✅ File found: {}", path.display())),
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 把 `--file` 轉成絕對路徑並確認它是一般檔案
    pub fn input_file(&self) -> Result<InputFile> {
        let Some(file) = self.file.as_deref() else {
            return Ok(InputFile::Unspecified);
        };

        let path = std::path::absolute(file)?;
        if path.is_file() {
            Ok(InputFile::Found(path))
        } else {
            Ok(InputFile::NotFound(path))
        }
    }

    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&self, settings: &mut settings::Settings) {
        if let Some(output) = &self.output {
            settings.output.path = output.clone();
        }
        if let Some(model) = &self.model {
            settings.model.name = model.clone();
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("env_file", &self.env_file)?;
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        if let Some(model) = &self.model {
            validation::validate_non_empty_string("model", model)?;
        }
        Ok(())
    }
}
