//! Page bundle collection and organization.
//!
//! Walks the bundle directory and collects every valid bundle into a
//! slug-indexed set of articles.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use nanceio_core::{Article, CoreError, PageBundle};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Extension of page bundle files.
pub const BUNDLE_EXTENSION: &str = "json";

/// Bundle collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bundle could not be parsed or failed validation.
    #[error("invalid bundle {path}: {source}")]
    Bundle {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// A bundle left out of the site, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBundle {
    pub path: PathBuf,
    pub reason: String,
}

/// Collected site content.
#[derive(Debug, Default)]
pub struct SiteContent {
    /// All articles indexed by slug.
    pub articles: BTreeMap<String, Article>,

    /// Bundles that were not included.
    pub skipped: Vec<SkippedBundle>,
}

impl SiteContent {
    /// Articles sorted newest first, ties broken by title.
    pub fn articles_by_date(&self) -> Vec<&Article> {
        let mut articles: Vec<_> = self.articles.values().collect();
        articles.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));
        articles
    }

    /// Insert an article unless its slug is taken. Returns whether it was added.
    pub fn insert(&mut self, path: &Path, article: Article) -> bool {
        if self.articles.contains_key(&article.slug) {
            warn!(path = %path.display(), slug = %article.slug, "duplicate slug, skipping bundle");
            self.skipped.push(SkippedBundle {
                path: path.to_path_buf(),
                reason: format!("duplicate slug {}", article.slug),
            });
            return false;
        }

        self.articles.insert(article.slug.clone(), article);
        true
    }
}

/// Collector that walks a directory of page bundles.
#[derive(Debug)]
pub struct BundleCollector {
    bundle_dir: PathBuf,
}

impl BundleCollector {
    /// Create a new bundle collector.
    #[must_use]
    pub fn new(bundle_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundle_dir: bundle_dir.into(),
        }
    }

    /// Collect all bundles from the bundle directory.
    pub fn collect(&self) -> Result<SiteContent> {
        info!(dir = %self.bundle_dir.display(), "collecting page bundles");

        let files = self.find_bundle_files()?;
        info!(count = files.len(), "found bundle files");

        let loaded: Vec<_> = files
            .par_iter()
            .map(|path| (path, load_bundle(path)))
            .collect();

        let mut content = SiteContent::default();
        for (path, result) in loaded {
            match result {
                Ok(article) => {
                    content.insert(path, article);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load bundle");
                    content.skipped.push(SkippedBundle {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            articles = content.articles.len(),
            skipped = content.skipped.len(),
            "bundle collection complete"
        );

        Ok(content)
    }

    /// Find all bundle files recursively, in path order.
    pub fn find_bundle_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        walk_dir(&self.bundle_dir, &mut files)?;
        files.sort();
        Ok(files)
    }
}

/// Read and validate a single page bundle.
pub fn load_bundle(path: &Path) -> Result<Article> {
    debug!(path = %path.display(), "loading bundle");

    let json = fs::read_to_string(path)?;
    PageBundle::from_json(&json)
        .and_then(|bundle| bundle.into_article(path))
        .map_err(|source| CollectorError::Bundle {
            path: path.to_path_buf(),
            source,
        })
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with('.'));
        if hidden {
            continue;
        }

        if path.is_dir() {
            walk_dir(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == BUNDLE_EXTENSION) {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;

    fn bundle_json(slug: &str, title: &str, date: &str) -> String {
        format!(
            r#"{{
                "data": {{ "markdownRemark": {{ "html": "<p>{title}</p>", "frontmatter": {{ "title": "{title}", "date": "{date}" }} }} }},
                "pathContext": {{ "slug": "{slug}", "previous": false, "next": false }}
            }}"#
        )
    }

    #[test]
    fn test_collect_bundles() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.json"),
            bundle_json("/a/", "Alpha", "August 19, 2016"),
        )
        .unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(
            dir.path().join("nested/b.json"),
            bundle_json("/b/", "Beta", "April 08, 2018"),
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let content = BundleCollector::new(dir.path()).collect().unwrap();

        assert_eq!(content.articles.len(), 2);
        assert!(content.skipped.is_empty());
        let titles: Vec<_> = content
            .articles_by_date()
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_malformed_bundles_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(
            dir.path().join("bad-date.json"),
            bundle_json("/x/", "X", "whenever"),
        )
        .unwrap();
        fs::write(
            dir.path().join("good.json"),
            bundle_json("/good/", "Good", "2017-10-16"),
        )
        .unwrap();

        let content = BundleCollector::new(dir.path()).collect().unwrap();

        assert_eq!(content.articles.len(), 1);
        assert_eq!(content.skipped.len(), 2);
        assert!(content.articles.contains_key("/good/"));
    }

    #[test]
    fn test_duplicate_slug_first_path_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("1.json"),
            bundle_json("/same/", "First", "2017-01-01"),
        )
        .unwrap();
        fs::write(
            dir.path().join("2.json"),
            bundle_json("same", "Second", "2017-01-02"),
        )
        .unwrap();

        let content = BundleCollector::new(dir.path()).collect().unwrap();

        assert_eq!(content.articles["/same/"].title, "First");
        assert_eq!(content.skipped.len(), 1);
        assert!(content.skipped[0].reason.contains("duplicate slug"));
    }

    #[test]
    fn test_hidden_entries_and_missing_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".cache")).unwrap();
        fs::write(
            dir.path().join(".cache/a.json"),
            bundle_json("/a/", "A", "2017-01-01"),
        )
        .unwrap();

        let content = BundleCollector::new(dir.path()).collect().unwrap();
        assert!(content.articles.is_empty());

        let content = BundleCollector::new(dir.path().join("missing"))
            .collect()
            .unwrap();
        assert!(content.articles.is_empty());
    }

    #[test]
    fn test_articles_by_date_tie_breaks_on_title() {
        let mut content = SiteContent::default();
        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        for (slug, title) in [("/b/", "Bravo"), ("/a/", "Alpha")] {
            content.insert(
                Path::new("x.json"),
                Article {
                    slug: slug.to_string(),
                    title: title.to_string(),
                    date,
                    date_display: "January 01, 2018".to_string(),
                    description: None,
                    html: String::new(),
                    previous: None,
                    next: None,
                    site_title: None,
                    author: None,
                },
            );
        }

        let titles: Vec<_> = content
            .articles_by_date()
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Alpha", "Bravo"]);
    }
}
