use clap::Parser;
use company_infosearcher::core::prompt::build_prompt;
use company_infosearcher::core::{CompanyTask, CredentialProvider, TextGenerator};
use company_infosearcher::utils::logger;
use company_infosearcher::{EnvFileCredentials, GeminiClient, Settings};

#[derive(Parser)]
#[command(name = "probe_model")]
#[command(about = "Send one company prompt to Gemini to check the key and model")]
struct Args {
    #[arg(long)]
    company: String,

    #[arg(long)]
    country: String,

    /// Optional TOML settings file
    #[arg(long)]
    config: Option<String>,

    #[arg(long, default_value = ".env")]
    env_file: String,

    #[arg(long)]
    model: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let settings = Settings::load(args.config.as_deref())?;
    let model = args.model.clone().unwrap_or(settings.model.name.clone());

    let credentials = EnvFileCredentials::new(&args.env_file);
    let status = credentials.resolve()?;
    let Some(api_key) = status.api_key() else {
        println!("{}", status.operator_message(credentials.path()));
        return Ok(());
    };

    let client = GeminiClient::with_base_url(
        api_key,
        settings.model.endpoint.as_str(),
        settings.request_timeout(),
    )?;
    let task = CompanyTask {
        ordinal: 1,
        country: args.country,
        company: args.company,
    };

    println!("🔍 Probing {} with {} ({})", model, task.company, task.country);
    match client.generate(&model, &build_prompt(&task)).await {
        Ok(text) => println!("✅ {}", text),
        Err(e) if e.is_rate_limited() => println!("⚠️ Rate limited: {}", e),
        Err(e) => println!("❌ {}", e),
    }

    Ok(())
}
