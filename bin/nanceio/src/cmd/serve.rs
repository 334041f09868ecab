//! Serve command - builds the site and serves it locally

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;

use super::build::{build_site, load_config, output_dir};
use crate::server::create_router;

/// Run the serve command.
///
/// Performs one build with the base URL pointed at the local server, then
/// serves the output directory until interrupted.
pub async fn run(config_path: &Path, output: Option<&Path>, port: u16) -> Result<()> {
    tracing::info!(?config_path, ?output, port, "Starting server");

    let addr = format!("127.0.0.1:{port}");

    let mut config = load_config(config_path)?;
    config.site.base_url = format!("http://{addr}");
    let output = output_dir(config_path, &config, output);

    let stats = build_site(config_path, config, &output)?;
    tracing::info!(?stats, "Initial build complete");

    let app = create_router(&output);
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Serving {} articles at http://{addr}", stats.articles);
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down server");
}
