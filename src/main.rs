use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use clap::Subcommand;
use museboard_ai::config::AppConfig;
use museboard_ai::database::Database;
use museboard_ai::embeddings::backfill_missing_embeddings;
use museboard_ai::embeddings::EmbeddingClient;
use museboard_ai::Result;
use tracing::info;

#[derive(Parser)]
#[command(name = "museboard-ai")]
#[command(about = "Museboard AI service: Shadow chat, semantic search, and onboarding flows")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,
        /// Enable permissive CORS
        #[arg(long)]
        cors: bool,
    },
    /// Backfill embeddings for muse items that don't have one yet
    Backfill,
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        museboard_ai::logging::init_logging_with_level("debug")?;
    } else {
        museboard_ai::logging::init_logging()?;
    }

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Serve { host, port, cors } => {
            museboard_ai::api::serve_api(&config, host, port, cors).await?;
        }
        Commands::Backfill => {
            handle_backfill_command(&config).await?;
        }
        Commands::Config => {
            handle_config_command(&config);
        }
    }

    Ok(())
}

async fn handle_backfill_command(config: &AppConfig) -> Result<()> {
    println!("🔄 Starting embeddings backfill...");

    let db = Arc::new(Database::from_config(config).await?);
    let embedder = Arc::new(EmbeddingClient::from_config(config)?);
    let delay = Duration::from_millis(config.backfill_delay_ms());

    let stats = backfill_missing_embeddings(db, embedder, delay).await?;

    println!("✅ Backfill complete!");
    println!("  - Total items: {}", stats.total);
    println!("  - Updated: {}", stats.updated);
    println!("  - Failed: {}", stats.failed);

    Ok(())
}

fn handle_config_command(config: &AppConfig) {
    println!("📋 Museboard AI Configuration:");
    println!();

    println!("🗄️  Database:");
    println!("  URL: {}", mask_database_url(config.database_url()));
    println!("  Max connections: {}", config.max_connections());
    println!("  Min connections: {}", config.min_connections());
    println!("  Connection timeout: {}s", config.connection_timeout());
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    println!("🧠 Embeddings:");
    println!("  Provider: {}", config.embedding_provider());
    println!("  Dimension: {}", config.embedding_dimension());
    println!("  Model: {}", config.embedding_model());
    println!("  Endpoint: {}", config.embedding_endpoint());
    println!();

    println!("💬 LLM:");
    println!("  Endpoint: {}", config.llm_endpoint());
    println!("  Model: {}", config.llm_model());
    println!("  Max tokens: {}", config.llm_max_tokens());
    println!();

    println!("🌐 Server:");
    println!("  Host: {}", config.server_host());
    println!("  Port: {}", config.server_port());
    println!("  CORS: {}", config.cors_enabled());
    println!();

    println!("🔄 Backfill:");
    println!("  Delay between calls: {}ms", config.backfill_delay_ms());
}

/// Mask database URL for logging (hide password)
fn mask_database_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            format!(
                "{}://{}@{}:{}",
                parsed.scheme(),
                parsed.username(),
                host,
                parsed.port().unwrap_or(5432)
            )
        } else {
            "***masked***".to_string()
        }
    } else {
        "***invalid***".to_string()
    }
}
