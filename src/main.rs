use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use gifr::application::{CacheAdminUseCase, RandomizeUseCase, ResultCache};
use gifr::infrastructure::config::Command;
use gifr::infrastructure::{
    AppConfig, CliArgs, FetcherConfig, GifsicleShuffler, HttpImageFetcher, ImgurUploader,
    StorageManager, TomlCacheStore,
};
use gifr::presentation::{CommandParser, GifrBot};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()
        .unwrap_or_else(|_| StorageManager::with_dir(std::env::temp_dir().join(gifr::NAME)));

    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn create_bot(config: &AppConfig) -> Result<GifrBot> {
    if config.imgur.has_placeholder_credentials() {
        warn!("Imgur credentials are still the placeholder values; uploads will fail");
    }

    let fetcher = HttpImageFetcher::new(&FetcherConfig {
        accept_invalid_certs: config.accept_invalid_certs,
        timeout_secs: config.http_timeout_secs,
    })?;
    let shuffler = GifsicleShuffler::new(&config.gifsicle_path, &config.cache_path);
    let uploader = ImgurUploader::new(&config.imgur, config.http_timeout_secs)?;

    let state_path = config.effective_state_path();
    info!(
        state = %state_path.display(),
        cache = %config.cache_path.display(),
        "Using result cache"
    );
    let store = Arc::new(TomlCacheStore::new(state_path));
    let cache = Arc::new(ResultCache::new(store, &config.cache_path));

    let randomize = Arc::new(RandomizeUseCase::new(
        Arc::new(fetcher),
        Arc::new(shuffler),
        Arc::new(uploader),
        cache.clone(),
    ));

    Ok(GifrBot::new(
        randomize,
        CacheAdminUseCase::new(cache),
        CommandParser::new(config.command_prefix.clone()),
    ))
}

async fn chat(bot: &GifrBot) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if let Some(reply) = bot.handle_line(&line).await {
            println!("{reply}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = gifr::VERSION, "Starting gifr");

    let bot = create_bot(&config)?;

    match args.command {
        Command::Randomize { url } => println!("{}", bot.randomize(Some(&url)).await),
        Command::Gimme { count } => println!("{}", bot.gimme(Some(&count)).await),
        Command::Spew => println!("{}", bot.spew().await),
        Command::Zap { target } => println!("{}", bot.zap(Some(&target)).await),
        Command::Chat => chat(&bot).await?,
    }

    Ok(())
}
