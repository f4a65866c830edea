use crate::utils::error::GenerationError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 一個國家標題與其底下的公司
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySection {
    pub country: String,
    pub companies: Vec<String>,
}

/// 輸入檔解析結果，保留國家與公司的原始順序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCatalog {
    pub sections: Vec<CountrySection>,
}

impl ParsedCatalog {
    pub fn countries(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.country.as_str()).collect()
    }

    pub fn company_lists(&self) -> Vec<&[String]> {
        self.sections.iter().map(|s| s.companies.as_slice()).collect()
    }

    pub fn company_count(&self) -> usize {
        self.sections.iter().map(|s| s.companies.len()).sum()
    }

    /// 攤平成任務清單，序號從 1 開始跨國家連續編號
    pub fn tasks(&self) -> Vec<CompanyTask> {
        self.sections
            .iter()
            .flat_map(|section| {
                section
                    .companies
                    .iter()
                    .map(move |company| (section.country.as_str(), company.as_str()))
            })
            .enumerate()
            .map(|(index, (country, company))| CompanyTask {
                ordinal: index + 1,
                country: country.to_string(),
                company: company.to_string(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyTask {
    pub ordinal: usize,
    pub country: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyResult {
    pub ordinal: usize,
    pub country: String,
    pub company: String,
    pub text: String,
}

impl CompanyResult {
    pub fn is_error(&self) -> bool {
        self.text.starts_with("ERROR:")
    }
}

/// 單一任務的終止狀態
#[derive(Debug)]
pub enum TaskOutcome {
    Succeeded(String),
    Failed(GenerationError),
    RetriesExhausted,
}

impl TaskOutcome {
    pub fn into_result(self, task: &CompanyTask) -> CompanyResult {
        let text = match self {
            TaskOutcome::Succeeded(text) => text,
            TaskOutcome::Failed(err) => format!("ERROR: {}", err),
            TaskOutcome::RetriesExhausted => {
                format!("ERROR: Too many retries for {}", task.company)
            }
        };

        CompanyResult {
            ordinal: task.ordinal,
            country: task.country.clone(),
            company: task.company.clone(),
            text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub elapsed: Duration,
    pub total_tasks: usize,
    pub model: String,
}

impl ExecutionSummary {
    pub fn new(
        started_at: DateTime<Local>,
        finished_at: DateTime<Local>,
        total_tasks: usize,
        model: impl Into<String>,
    ) -> Self {
        let elapsed = (finished_at - started_at).to_std().unwrap_or_default();
        Self {
            started_at,
            finished_at,
            elapsed,
            total_tasks,
            model: model.into(),
        }
    }
}
