//! Entry point: `serve` (the default) runs the HTTP server, `issue-token` prints a
//! preview token.

use clap::Parser;
use local_api_examples::lifecycle::{setup_tracing, LocalApiProvider};
use local_api_examples::preview::PreviewAuth;
use local_api_examples::{build_router, AppState, Cli, Command, Config};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cli.config).await,
        Command::IssueToken { subject } => {
            let auth = PreviewAuth::new(cli.config.secret.as_bytes(), cli.config.preview_ttl_secs);
            let token = auth.issue(&subject).map_err(|e| e.to_string())?;
            println!("{token}");
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<(), String> {
    let bind = config.bind;
    let provider = Arc::new(LocalApiProvider::new(config));
    // Start eagerly so a bad DATABASE_URI fails before we accept connections.
    provider.get().await.map_err(|e| e.to_string())?;

    let app = build_router(AppState::with_provider(provider.clone()));
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| e.to_string())?;
    info!("listening on {}", listener.local_addr().map_err(|e| e.to_string())?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| e.to_string())?;

    match Arc::try_unwrap(provider) {
        Ok(provider) => {
            if let Some(api) = provider.into_inner() {
                api.shutdown().await?;
            }
        }
        Err(_) => warn!("Local API still referenced; skipping actor shutdown"),
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
