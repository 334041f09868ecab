//! nance.io CLI
//!
//! Builds the nance.io blog from page bundles and serves it locally.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for nance.io.
#[derive(Parser)]
#[command(
    name = "nanceio",
    version,
    about = "Static site generator for the nance.io blog"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Output directory (defaults to `[build] output_dir`)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override site base URL (e.g., https://nance.io)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Build, then serve the output locally
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Output directory (defaults to `[build] output_dir`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate configuration and page bundles
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Convert compiled page bundle scripts into JSON page bundles
    Import {
        /// Directory holding `path---*.js` files
        source: PathBuf,
        /// Bundle directory to write into
        #[arg(short, long, default_value = "bundles")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    nanceio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, base_url } => {
            nanceio::cmd::build::run(&cli.config, output.as_deref(), base_url.as_deref())?;
        }
        Commands::Serve { port, output } => {
            nanceio::cmd::serve::run(&cli.config, output.as_deref(), port).await?;
        }
        Commands::Check { strict } => {
            nanceio::cmd::check::run(&cli.config, strict)?;
        }
        Commands::Import { source, output } => {
            nanceio::cmd::import::run(&source, &output)?;
        }
    }

    Ok(())
}
