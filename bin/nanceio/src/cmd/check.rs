//! Check command - validate configuration and page bundles

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use nanceio_core::Config;
use nanceio_generator::{BundleCollector, SiteContent};

use super::build::resolve_dir;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and all page bundles.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and bundles");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let bundle_dir = match Config::load_with_env(config_path) {
        Ok(config) => {
            println!("  ✓ Configuration valid");
            check_config_values(&config, &mut result);
            resolve_dir(config_path, &config.build.bundle_dir)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            resolve_dir(config_path, "bundles")
        }
    };

    println!("\nChecking page bundles...");
    if bundle_dir.is_dir() {
        let content = BundleCollector::new(&bundle_dir).collect()?;
        println!("  ✓ {} article(s) loaded", content.articles.len());
        validate_content(&content, &mut result);
    } else {
        result.add_warning(format!(
            "Bundle directory {} does not exist",
            bundle_dir.display()
        ));
    }

    print_summary(&result);

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Check collected articles for skipped bundles and broken navigation.
pub fn validate_content(content: &SiteContent, result: &mut ValidationResult) {
    for skipped in &content.skipped {
        result.add_error(format!("{}: {}", skipped.path.display(), skipped.reason));
    }

    if content.articles.is_empty() {
        result.add_warning("No articles found");
    }

    for article in content.articles.values() {
        if article.description.is_none() {
            result.add_warning(format!("{}: missing description", article.slug));
        }

        for (label, link) in [("previous", &article.previous), ("next", &article.next)] {
            let Some(link) = link else { continue };
            if !content.articles.contains_key(&link.slug) {
                result.add_warning(format!(
                    "{}: {label} link points to unknown article {}",
                    article.slug, link.slug
                ));
            }
        }
    }
}

fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if config.site.description.is_none() {
        result.add_warning("site.description is not set; the feed will reuse the title");
    }

    if !config.site.base_url.starts_with("http://") && !config.site.base_url.starts_with("https://")
    {
        result.add_warning(format!(
            "site.base_url '{}' should start with http:// or https://",
            config.site.base_url
        ));
    }
}

fn print_summary(result: &ValidationResult) {
    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn bundle(slug: &str, description: Option<&str>, next: Option<&str>) -> String {
        let description = description
            .map(|d| format!(r#", "description": "{d}""#))
            .unwrap_or_default();
        let next = next
            .map(|n| format!(r#"{{ "fields": {{ "slug": "{n}" }}, "frontmatter": {{ "title": "Next" }} }}"#))
            .unwrap_or_else(|| "false".to_string());
        format!(
            r#"{{
                "data": {{ "markdownRemark": {{ "html": "<p>x</p>", "frontmatter": {{ "title": "T", "date": "2017-01-01"{description} }} }} }},
                "pathContext": {{ "slug": "{slug}", "previous": false, "next": {next} }}
            }}"#
        )
    }

    fn write_site(dir: &Path, bundles: &[(&str, String)]) -> std::path::PathBuf {
        let config_path = dir.join("config.toml");
        fs::write(
            &config_path,
            "[site]\ntitle = \"nance.io\"\nbase_url = \"https://nance.io\"\ndescription = \"Blog\"\n",
        )
        .unwrap();
        fs::create_dir(dir.join("bundles")).unwrap();
        for (name, json) in bundles {
            fs::write(dir.join("bundles").join(name), json).unwrap();
        }
        config_path
    }

    #[test]
    fn test_validate_content_warnings() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), bundle("/a/", None, Some("/gone/"))).unwrap();
        fs::write(dir.path().join("b.json"), bundle("/b/", Some("ok"), Some("/a/"))).unwrap();
        fs::write(dir.path().join("c.json"), "not json").unwrap();

        let content = BundleCollector::new(dir.path()).collect().unwrap();
        let mut result = ValidationResult::default();
        validate_content(&content, &mut result);

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings.iter().any(|w| w == "/a/: missing description"));
        assert!(
            result
                .warnings
                .iter()
                .any(|w| w.contains("next link points to unknown article /gone/"))
        );
    }

    #[test]
    fn test_run_passes_clean_site() {
        let dir = TempDir::new().unwrap();
        let config_path = write_site(dir.path(), &[("a.json", bundle("/a/", Some("ok"), None))]);

        assert!(run(&config_path, true).is_ok());
    }

    #[test]
    fn test_run_strict_fails_on_warnings() {
        let dir = TempDir::new().unwrap();
        let config_path = write_site(dir.path(), &[("a.json", bundle("/a/", None, None))]);

        assert!(run(&config_path, false).is_ok());
        assert!(run(&config_path, true).is_err());
    }

    #[test]
    fn test_run_fails_on_bad_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[site]\ntitle = \"\"\nbase_url = \"https://nance.io\"\n").unwrap();

        assert!(run(&config_path, false).is_err());
    }
}
