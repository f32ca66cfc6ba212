use anyhow::Result;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crypto_dash::models::Config;
use crypto_dash::ui;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging - keep it on stderr and quiet by default, anything
    // printed over the TUI garbles it. RUST_LOG still overrides.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("crypto_dash=error"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = ui::app::run(config).await {
        eprintln!("Dashboard error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
