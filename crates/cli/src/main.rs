use std::sync::Arc;

use {
    clap::Parser,
    secrecy::Secret,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    banter_auto_reply::{RandomPacing, ReplyEngine},
    banter_channels::ChannelOutbound,
    banter_gateway::AppState,
    banter_providers::FallbackChain,
    banter_sessions::SessionStore,
};

#[derive(Parser)]
#[command(name = "banter", about = "banter — a friend-shaped telegram companion")]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Address to bind the health server to (overrides config value).
    #[arg(long)]
    bind: Option<String>,

    /// Port for the health server (overrides config value).
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Custom config directory (overrides default discovery).
    #[arg(long, env = "BANTER_CONFIG_DIR")]
    config_dir: Option<std::path::PathBuf>,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "banter starting");

    let mut config = banter_config::discover_and_load(cli.config_dir.as_deref());

    // Bare-environment fallbacks for the two secrets, so running without a
    // config file still works.
    if !config.telegram.has_token()
        && let Ok(token) = std::env::var("TELEGRAM_TOKEN")
    {
        config.telegram.token = Secret::new(token);
    }
    if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
        config.providers.api_key = Secret::new(key);
    }
    if !config.telegram.has_token() {
        anyhow::bail!("no telegram token configured (telegram.token or TELEGRAM_TOKEN)");
    }

    // CLI args override config values.
    let bind = cli.bind.unwrap_or_else(|| config.server.bind.clone());
    let port = cli.port.unwrap_or(config.server.port);

    let sessions = Arc::new(SessionStore::new());
    let chain = Arc::new(FallbackChain::from_config(&config.providers));
    info!(providers = chain.len(), "fallback chain ready");

    let (bot, telegram_outbound) = banter_telegram::bot::build_bot(&config.telegram)?;
    let outbound: Arc<dyn ChannelOutbound> = telegram_outbound;

    let engine = Arc::new(ReplyEngine::new(
        Arc::clone(&sessions),
        Arc::clone(&chain),
        Arc::clone(&outbound),
        Arc::new(RandomPacing),
    ));

    let cancel = banter_telegram::start_polling(
        bot,
        engine,
        Arc::clone(&sessions),
        Arc::clone(&outbound),
    )
    .await?;

    let state = AppState::new(sessions, chain);

    tokio::select! {
        result = banter_gateway::start_server(&bind, port, state) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
            cancel.cancel();
        },
    }

    Ok(())
}
