mod config;

use cartbot_commerce::HttpCommerceClient;
use cartbot_conversation::{Conversation, EventProcessor};
use cartbot_gateway::{shutdown_signal, GatewayServer, WebhookState};
use cartbot_messenger::MessengerClient;
use cartbot_session::{FileStore, KeyValueStore, MemoryStore, RedisStore, SessionStore};
use clap::{Parser, Subcommand, ValueEnum};
use config::{CartbotConfig, SessionBackend};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cartbot", about = "Cartbot: Messenger shopping assistant", version)]
struct Cli {
    /// Path to config file (default: ./cartbot.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Parse and validate the configuration, then print a summary
    CheckConfig,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let mut config = CartbotConfig::load(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok())?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;
            serve(config).await?;
        }
        Commands::CheckConfig => check_config(&config)?,
    }

    Ok(())
}

async fn serve(config: CartbotConfig) -> anyhow::Result<()> {
    let kv: Arc<dyn KeyValueStore> = match &config.session {
        SessionBackend::Memory => Arc::new(MemoryStore::new()),
        SessionBackend::File { data_dir } => Arc::new(FileStore::new(data_dir.clone()).await?),
        SessionBackend::Redis { url } => Arc::new(RedisStore::connect(url).await?),
    };
    let sessions = SessionStore::new(kv);
    let commerce = Arc::new(HttpCommerceClient::new(config.commerce.clone())?);
    let conversation = Conversation::new(commerce, sessions, &config.conversation);

    let typing_delay = Duration::from_millis(config.messenger.typing_delay_ms);
    let dispatcher = Arc::new(MessengerClient::new(config.messenger.clone())?);
    let processor = Arc::new(EventProcessor::new(conversation, dispatcher, typing_delay));

    let state = Arc::new(WebhookState {
        verify_token: config.messenger.verify_token.clone(),
        app_secret: config.messenger.app_secret.clone(),
        processor,
    });
    let app = GatewayServer::build(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        addr = %addr,
        session_backend = %config.session.describe(),
        signature_check = config.messenger.app_secret.is_some(),
        "Starting Cartbot"
    );
    let listener = TcpListener::bind(&addr).await?;
    GatewayServer::serve(listener, app, shutdown_signal()).await?;
    info!("Cartbot stopped");
    Ok(())
}

fn check_config(config: &CartbotConfig) -> anyhow::Result<()> {
    println!("Server:        {}:{}", config.server.host, config.server.port);
    println!("Send API:      {}", config.messenger.messages_url());
    println!("Typing delay:  {} ms", config.messenger.typing_delay_ms);
    println!(
        "Signature:     {}",
        if config.messenger.app_secret.is_some() {
            "required"
        } else {
            "not checked"
        }
    );
    println!(
        "Catalog:       {} ({}, {})",
        config.commerce.base_url, config.commerce.country_code, config.commerce.accept_language
    );
    println!("Login URL:     {}", config.conversation.login_url);
    println!("Sessions:      {}", config.session.describe());
    config.validate()?;
    println!("\nConfiguration OK");
    Ok(())
}
