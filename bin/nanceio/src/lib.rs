//! nance.io CLI Library
//!
//! Command implementations and the local server behind the `nanceio` binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, serve, check, import)
//! - [`server`] - Static file server for the built site
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use nanceio::cmd;
//!
//! // Build the site into the configured `[build] output_dir`
//! cmd::build::run(Path::new("config.toml"), None, None).unwrap();
//! ```

pub mod cmd;
pub mod server;

pub use nanceio_core::{Article, Config};
pub use nanceio_generator::{BuildStats, Builder, BundleCollector, SiteContent};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
