//! Build command - generates the static site

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use nanceio_core::Config;
use nanceio_generator::{BuildStats, Builder};

/// Load configuration from `config_path` with environment overrides applied.
pub fn load_config(config_path: &Path) -> Result<Config> {
    let config = Config::load_with_env(config_path).wrap_err_with(|| {
        format!("Failed to load configuration from {}", config_path.display())
    })?;
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Resolve a configured directory relative to the config file's directory.
pub fn resolve_dir(config_path: &Path, dir: &str) -> PathBuf {
    let dir = Path::new(dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    config_path
        .parent()
        .map_or_else(|| dir.to_path_buf(), |root| root.join(dir))
}

/// Pick the output directory: `output` when given, otherwise `[build] output_dir`
/// resolved against the config file's directory.
pub fn output_dir(config_path: &Path, config: &Config, output: Option<&Path>) -> PathBuf {
    output.map_or_else(
        || resolve_dir(config_path, &config.build.output_dir),
        Path::to_path_buf,
    )
}

/// Run the build command.
///
/// Builds the site from page bundles into the output directory.
pub fn run(config_path: &Path, output: Option<&Path>, base_url: Option<&str>) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, ?base_url, "Starting build");

    let mut config = load_config(config_path)?;
    let output = output_dir(config_path, &config, output);

    if let Some(url) = base_url {
        tracing::info!(base_url = url, "Overriding site base URL from CLI");
        config.site.base_url = url.to_string();
        config.validate().wrap_err("Invalid base URL")?;
    }

    let stats = build_site(config_path, config, &output)?;
    let duration = start.elapsed();

    print_build_stats(&stats, &output);
    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}

/// Build the site described by `config` into `output`.
pub fn build_site(config_path: &Path, mut config: Config, output: &Path) -> Result<BuildStats> {
    config.build.output_dir = output.to_string_lossy().to_string();

    let bundle_dir = resolve_dir(config_path, &config.build.bundle_dir);
    let static_dir = resolve_dir(config_path, &config.build.static_dir);

    let mut builder = Builder::new(config, bundle_dir, output);
    if static_dir.is_dir() {
        tracing::info!(dir = %static_dir.display(), "Found static directory, will copy to output");
        builder = builder.with_static_dir(static_dir);
    }

    builder.build().wrap_err("Build failed")
}

fn print_build_stats(stats: &BuildStats, output: &Path) {
    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Articles:   {}", stats.articles);
    println!("  Skipped:    {}", stats.skipped);
    println!("  Assets:     {}", stats.assets);
    println!();
    println!("  Duration:   {}ms", stats.duration_ms);
    println!("  Output:     {}", output.display());
    println!();
}
