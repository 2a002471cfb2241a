use std::sync::Arc;

use flowly::config::{AppConfig, Mode};
use flowly::interview::InterviewDriver;
use flowly::llm::create_provider;
use flowly::routes::{AppState, routes};
use flowly::store::FormStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    eprintln!("💬 Flowly v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.llm.model);
    eprintln!("   Data: {}", config.data_dir.display());

    let llm = create_provider(&config.llm);
    let store = Arc::new(FormStore::new(config.data_dir.clone()));
    store.ensure_dirs().await?;
    let driver = Arc::new(InterviewDriver::new(llm));

    match config.mode {
        Mode::Cli => {
            eprintln!("   Mode: terminal interview\n");
            flowly::cli::run(&driver, &store).await?;
        }
        Mode::Serve => {
            eprintln!("   API: http://0.0.0.0:{}/api/forms\n", config.port);
            let app = routes(AppState::new(driver, store));
            let listener =
                tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
            tracing::info!(port = config.port, "Flowly server started");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
