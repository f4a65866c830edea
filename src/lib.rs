pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{gemini::GeminiClient, sleeper::TokioSleeper, storage::LocalStorage};
pub use config::credentials::{CredentialStatus, EnvFileCredentials};
pub use config::settings::Settings;
pub use core::{engine::InfosearchEngine, processor::SequentialProcessor};
pub use utils::error::{GenerationError, InfosearchError, Result};
