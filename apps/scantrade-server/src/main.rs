//! ScanTrade Server Binary
//!
//! Serves the sheet scanner, webhook management, settings, interaction and
//! chat proxy endpoints.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin scantrade-server
//! ```
//!
//! # Environment Variables
//!
//! - `SCANTRADE_CONFIG`: Config file path (default: config.yaml)
//! - `PORT`: HTTP port when no config file exists (default: 3000)
//! - `GEMINI_API_KEY`: Server-side chat model key
//! - `DISCORD_PUBLIC_KEY`: Interaction signature key (hex)
//! - `RUST_LOG`: Log filter (overrides `observability.logging.level`)

use std::time::Duration;

use anyhow::Context;
use scantrade_server::config::{Config, load_config};
use scantrade_server::infrastructure::config::Container;
use scantrade_server::infrastructure::http::create_router;
use scantrade_server::observability::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS operations
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    load_dotenv_from_ancestors();

    let config = load_config(None).context("loading configuration")?;
    init_tracing(&config.observability.logging).context("initializing logging")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting ScanTrade server");
    log_config(&config);

    let container = Container::from_config(config.clone())
        .await
        .context("wiring adapters")?;
    let app = create_router(container.app_state(env!("CARGO_PKG_VERSION")));

    let addr = config.server.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    tracing::info!("ScanTrade server stopped");
    Ok(())
}

/// Log the loaded configuration without secrets.
fn log_config(config: &Config) {
    tracing::info!(
        http_port = config.server.http_port,
        sheets_base_url = %config.sheets.base_url,
        max_signals = config.sheets.max_signals,
        chat_model = %config.chat.model,
        chat_key_configured = config.chat.api_key.as_deref().is_some_and(|k| !k.is_empty()),
        interactions_enabled = config.discord.public_key().is_some(),
        sessions = config.auth.sessions.len(),
        webhooks_path = ?config.storage.webhooks_path,
        "Configuration loaded"
    );
}

/// Load .env file from current or ancestor directories.
fn load_dotenv_from_ancestors() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    tracing::info!(
        timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
        "Draining in-flight requests"
    );

    // Force exit if draining outlives the timeout.
    tokio::spawn(async {
        tokio::time::sleep(SHUTDOWN_TIMEOUT).await;
        tracing::warn!("Shutdown timeout elapsed, exiting");
        std::process::exit(0);
    });
}
