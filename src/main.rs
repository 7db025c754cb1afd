use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use tokio_util::sync::CancellationToken;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use transchain::config::{parse_provider_list, Config};
use transchain::{create_translators, LanguageCode, TranslationOrchestrator};

#[derive(Parser)]
#[command(name = "transchain")]
#[command(version, about = "Translate text, falling back across web translation services")]
#[command(long_about = "Translate text using Google, LibreTranslate and DeepL in priority order. \
The first provider to return a usable translation wins.")]
struct Cli {
    /// Text to translate, or '-' to read from stdin
    #[arg(required_unless_present = "list_languages")]
    text: Option<String>,

    /// Source language name (e.g. English, Japanese) or 'auto'
    #[arg(short, long, default_value = "auto")]
    from: String,

    /// Target language name (e.g. French, Chinese)
    #[arg(short, long, default_value = "English")]
    to: String,

    /// Provider order, comma separated: google, libre, deepl
    #[arg(short, long)]
    providers: Option<String>,

    /// Give up after this many seconds across all providers
    #[arg(short, long)]
    deadline: Option<u64>,

    /// List supported language names and exit
    #[arg(long)]
    list_languages: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn read_text(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read text from stdin")?;
    Ok(buf.trim_end_matches(['\n', '\r']).to_string())
}

fn language_list() -> String {
    LanguageCode::supported()
        .iter()
        .map(|code| format!("{:<12} {}", code.name(), code.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.list_languages {
        println!("{}", language_list());
        return Ok(());
    }

    let text = read_text(cli.text.as_deref().unwrap_or_default())?;

    // Load and validate configuration
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(ref list) = cli.providers {
        config.providers = Some(parse_provider_list(list).map_err(|e| anyhow::anyhow!(e))?);
    }
    if let Some(secs) = cli.deadline {
        config.deadline_secs = Some(secs);
    }
    config.validate().context("Configuration validation failed")?;

    let providers = create_translators(&config).context("Failed to create translators")?;
    let mut orchestrator = TranslationOrchestrator::new(providers);
    if let Some(deadline) = config.deadline() {
        orchestrator = orchestrator.with_deadline(deadline);
    }

    info!("Providers: {}", orchestrator.provider_names().join(" -> "));
    info!("Translate: {} -> {}", cli.from, cli.to);

    let token = CancellationToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("Failed to install Ctrl+C handler")?;

    let translated = orchestrator
        .translate_cancellable(&text, &cli.from, &cli.to, &token)
        .await
        .context("Translation failed")?;

    println!("{}", translated);
    Ok(())
}
