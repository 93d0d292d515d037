use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tokio::time::sleep;

use tunefetch::cli::{Cli, Commands};
use tunefetch::core::{config::Config, init_logger, log_cookies_configuration, log_tool_versions};
use tunefetch::download::{AudioFetcher, RequestScope, YtDlpExtractor};
use tunefetch::messages;
use tunefetch::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Attempts at reaching the Bot API on startup
const STARTUP_MAX_RETRIES: u32 = 12;

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (configuration, logging, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    let app_config = Config::from_env()?;

    // Initialize logger (console + file)
    init_logger(&app_config.log_file_path)?;

    // Log panics raised inside handler tasks
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    match cli.command {
        Some(Commands::Fetch { query }) => run_cli_fetch(app_config, query.join(" ")).await,
        Some(Commands::Run) => run_bot(app_config).await,
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot(app_config).await
        }
    }
}

fn build_fetcher(app_config: &Config) -> AudioFetcher {
    let extractor = YtDlpExtractor::new(app_config.ytdl_bin.clone(), app_config.ytdlp_timeout);
    AudioFetcher::new(Arc::new(extractor))
}

/// Runs the bot with long polling until Ctrl-C
async fn run_bot(app_config: Config) -> Result<()> {
    log::info!("Starting tunefetch bot...");

    log_cookies_configuration(&app_config);
    log_tool_versions(&app_config.ytdl_bin).await;

    fs_err::create_dir_all(&app_config.download_dir)?;
    log::info!("Download directory: {}", app_config.download_dir.display());

    let bot = create_bot(&app_config)?;

    // Bot API may still be starting (local server in docker-compose)
    let me = {
        let mut attempt = 1;
        loop {
            match bot.get_me().await {
                Ok(me) => break me,
                Err(e) if attempt < STARTUP_MAX_RETRIES => {
                    log::warn!(
                        "Bot API not ready (attempt {}/{}): {}. Retrying in 5 seconds...",
                        attempt,
                        STARTUP_MAX_RETRIES,
                        e
                    );
                    attempt += 1;
                    sleep(Duration::from_secs(5)).await;
                }
                Err(e) => {
                    return Err(anyhow::anyhow!(
                        "Failed to connect to Bot API after {} attempts: {}",
                        attempt,
                        e
                    ))
                }
            }
        }
    };
    let bot_username = me.user.username.clone().unwrap_or_default();
    log::info!("Bot username: @{}, Bot ID: {}", bot_username, me.user.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let fetcher = Arc::new(build_fetcher(&app_config));
    let deps = HandlerDeps::new(Arc::new(app_config), fetcher, bot_username);

    log::info!("📡 Ready to receive updates!");

    Dispatcher::builder(bot, schema(deps))
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

/// Downloads one query into the download directory and prints the file path
async fn run_cli_fetch(app_config: Config, query: String) -> Result<()> {
    let fetcher = build_fetcher(&app_config);
    let scope = RequestScope::open(&app_config.download_dir, app_config.cookies_content.as_ref())?;

    let track = match fetcher.fetch_audio(&query, scope.dir(), scope.cookie_file()).await {
        Ok(track) => track,
        Err(e) => {
            eprintln!("{}", messages::fetch_failed(&e));
            return Err(e.into());
        }
    };

    // The scope directory is removed on drop, so the file is moved out first
    let file_name = track
        .path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("downloaded file has no name: {}", track.path.display()))?;
    let target = app_config.download_dir.join(file_name);
    fs_err::rename(&track.path, &target)?;
    drop(scope);

    println!("🎵 {} ({})", track.title, track.provider);
    if let Some(performer) = &track.performer {
        println!("👤 {}", performer);
    }
    println!("{}", target.display());
    Ok(())
}
