use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use villa_docs_backend::app::app::App;
use villa_docs_backend::util::logger::Logger;

#[tokio::main]
async fn main() {
    // Load before logging so LOG_DIR and the level variables apply
    let env_loaded = dotenv();

    // Guards must outlive the server or buffered file output is lost
    let _logger = match Logger::new() {
        Ok(logger) => Some(logger),
        Err(e) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
                .with_target(true)
                .try_init();
            warn!("⚠️ File logging unavailable ({}), logging to console only", e);
            None
        }
    };

    info!("🚀 Starting Villa documents backend");
    match env_loaded {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.start().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
