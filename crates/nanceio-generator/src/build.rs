//! Build orchestration.
//!
//! Coordinates the full site build process.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use nanceio_core::{Article, Config};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    assets::{AssetError, AssetManifest, AssetProcessor},
    collector::{BundleCollector, CollectorError, SiteContent},
    html::{HtmlError, HtmlGenerator},
    rss::{RssError, RssGenerator},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// RSS generation error.
    #[error("RSS error: {0}")]
    Rss(#[from] RssError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// The output directory holds build inputs and cannot be cleaned.
    #[error("refusing to clean output directory {output}: it contains {input}")]
    UnsafeOutput { output: PathBuf, input: PathBuf },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of article pages written.
    pub articles: usize,

    /// Bundles left out, plus articles that failed to render.
    pub skipped: usize,

    /// Number of assets copied.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    bundle_dir: PathBuf,
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(
        config: Config,
        bundle_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            bundle_dir: bundle_dir.into(),
            output_dir: output_dir.into(),
            static_dir: None,
        }
    }

    /// Set the static assets directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            bundles = %self.bundle_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        // 1. Clean output directory
        self.clean_output()?;

        // 2. Collect bundles
        let content = BundleCollector::new(&self.bundle_dir).collect()?;
        stats.skipped = content.skipped.len();

        // 3. Article pages
        let generator = HtmlGenerator::new(self.config.clone());
        let (written, failed) = self.generate_articles(&generator, &content);
        stats.articles = written;
        stats.skipped += failed;

        // 4. Index and 404
        let articles = content.articles_by_date();
        self.generate_index(&generator, &articles)?;
        self.write_page(&self.output_dir.join("404.html"), &generator.generate_not_found()?)?;

        // 5. RSS feed
        if self.config.rss.enabled {
            self.generate_rss(&articles)?;
        }

        // 6. Static assets
        if let Some(ref static_dir) = self.static_dir {
            let manifest = self.process_assets(static_dir)?;
            stats.assets = manifest.len();
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            articles = stats.articles,
            skipped = stats.skipped,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Clean the output directory.
    ///
    /// Fails without removing anything when the output directory is, or
    /// contains, the bundle or static directory.
    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            let output = self.output_dir.canonicalize()?;
            let inputs = std::iter::once(&self.bundle_dir).chain(self.static_dir.as_ref());
            for input in inputs {
                let Ok(input) = input.canonicalize() else {
                    continue;
                };
                if input.starts_with(&output) {
                    return Err(BuildError::UnsafeOutput { output, input });
                }
            }

            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Render every article in parallel. Returns `(written, failed)`.
    fn generate_articles(&self, generator: &HtmlGenerator, content: &SiteContent) -> (usize, usize) {
        let articles: Vec<&Article> = content.articles.values().collect();
        info!(count = articles.len(), "generating article pages");

        let results: Vec<_> = articles
            .par_iter()
            .map(|article| {
                let html = generator.generate_article(article)?;
                let output_path = generator.output_path(&article.slug, &self.output_dir);
                self.write_page(&output_path, &html)?;
                Ok::<_, BuildError>(())
            })
            .collect();

        let mut written = 0;
        let mut failed = 0;
        for (article, result) in articles.iter().zip(results) {
            match result {
                Ok(()) => written += 1,
                Err(e) => {
                    warn!(slug = %article.slug, error = %e, "failed to generate article");
                    failed += 1;
                }
            }
        }

        (written, failed)
    }

    fn generate_index(&self, generator: &HtmlGenerator, articles: &[&Article]) -> Result<()> {
        let html = generator.generate_index(articles)?;
        self.write_page(&self.output_dir.join("index.html"), &html)
    }

    /// Generate RSS feed.
    fn generate_rss(&self, articles: &[&Article]) -> Result<()> {
        let generator = RssGenerator::new(self.config.clone());
        let xml = generator.generate(articles)?;

        let output_path = self.output_dir.join("rss.xml");
        fs::write(&output_path, xml)?;

        info!(path = %output_path.display(), "generated RSS feed");
        Ok(())
    }

    fn process_assets(&self, static_dir: &Path) -> Result<AssetManifest> {
        Ok(AssetProcessor::new().process(static_dir, &self.output_dir)?)
    }

    fn write_page(&self, path: &Path, html: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)?;
        debug!(path = %path.display(), "wrote page");
        Ok(())
    }
}
