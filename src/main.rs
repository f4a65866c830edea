use clap::{CommandFactory, Parser};
use company_infosearcher::config::InputFile;
use company_infosearcher::core::catalog::load_catalog;
use company_infosearcher::core::report::format_duration;
use company_infosearcher::core::{CredentialProvider, ParsedCatalog};
use company_infosearcher::utils::{logger, validation::Validate};
use company_infosearcher::{
    CliConfig, EnvFileCredentials, GeminiClient, InfosearchEngine, LocalStorage,
    SequentialProcessor, Settings, TokioSleeper,
};

// 單執行緒執行：請求必須一個接一個送出
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let started_at = chrono::Local::now();
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting company-infosearcher");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let input = config.input_file()?;
    if let Some(message) = input.operator_message() {
        println!("{}", message);
    }
    let input_path = match input {
        InputFile::Found(path) => path,
        InputFile::NotFound(_) => return Ok(()),
        InputFile::Unspecified => {
            CliConfig::command().print_help()?;
            return Ok(());
        }
    };

    let mut settings = match Settings::load(config.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load settings: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    config.apply_overrides(&mut settings);
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Settings validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(".");
    let catalog = load_catalog(&storage, &input_path.to_string_lossy()).await?;
    println!("✅ Text file loaded successfully.");

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No requests will be sent");
        print_plan(&catalog, &settings);
        return Ok(());
    }

    let credentials = EnvFileCredentials::new(&config.env_file);
    let status = credentials.resolve()?;
    println!("{}", status.operator_message(credentials.path()));
    let Some(api_key) = status.api_key() else {
        return Ok(());
    };

    let client = GeminiClient::with_base_url(
        api_key,
        settings.model.endpoint.as_str(),
        settings.request_timeout(),
    )?;
    let processor = SequentialProcessor::new(client, TokioSleeper, settings.model.name.as_str())
        .with_pacing(settings.pacing_policy())
        .with_retry(settings.retry_policy());
    let engine = InfosearchEngine::new(processor, storage, settings.output.path.as_str());

    match engine.run(&catalog, started_at).await {
        Ok(outcome) => {
            println!("✅ All responses saved to {}", outcome.output_path);
            println!(
                "⏱ Total execution time: {}",
                format_duration(outcome.summary.elapsed)
            );
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_plan(catalog: &ParsedCatalog, settings: &Settings) {
    let tasks = catalog.tasks();
    println!("📋 Execution plan ({} companies, model {})", tasks.len(), settings.model.name);

    let mut current_country: Option<&str> = None;
    for task in &tasks {
        if current_country != Some(task.country.as_str()) {
            current_country = Some(task.country.as_str());
            println!("\n=== {} ===", task.country);
        }
        println!("  {}- {}", task.ordinal, task.company);
    }

    for section in catalog.sections.iter().filter(|s| s.companies.is_empty()) {
        println!("⚠️ {} has no companies", section.country);
    }

    let estimate = settings.pacing_policy().estimate(tasks.len());
    println!("\n⏱ Estimated total time: {}", format_duration(estimate));
}
