pub mod catalog;
pub mod engine;
pub mod policy;
pub mod processor;
pub mod prompt;
pub mod report;

pub use crate::domain::model::{
    CompanyResult, CompanyTask, CountrySection, ExecutionSummary, ParsedCatalog, TaskOutcome,
};
pub use crate::domain::ports::{CredentialProvider, Sleeper, Storage, TextGenerator};
pub use crate::utils::error::Result;
