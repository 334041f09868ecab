//! HTML generation for articles and site pages.
//!
//! Wraps page-specific templates in the base template, with the bio card and
//! scroll-to-top control composed in.

use std::path::{Component, Path, PathBuf};

use chrono::{Datelike, Utc};
use nanceio_core::{AUTHOR, Article, Config, NavLink};
use nanceio_ui::{Bio, ScrollUp};
use thiserror::Error;
use tracing::debug;

use crate::template::{Template, TemplateContext, TemplateError, TemplateRegistry};

/// Maximum excerpt length on the index page, in characters.
pub const EXCERPT_CHARS: usize = 160;

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// HTML page generator.
#[derive(Debug)]
pub struct HtmlGenerator {
    templates: TemplateRegistry,
    config: Config,
    bio: Bio,
    scroll_up: ScrollUp,
}

impl HtmlGenerator {
    /// Create a new HTML generator with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_templates(config, TemplateRegistry::new())
    }

    /// Create a generator with custom templates.
    #[must_use]
    pub fn with_templates(config: Config, templates: TemplateRegistry) -> Self {
        let scroll_up = ScrollUp::new(config.scroll_up.show_under);
        Self {
            templates,
            config,
            bio: Bio::new(&AUTHOR),
            scroll_up,
        }
    }

    /// Register a custom template.
    pub fn register_template(&mut self, template: Template) {
        self.templates.register(template);
    }

    /// Generate the HTML page for an article.
    pub fn generate_article(&self, article: &Article) -> Result<String> {
        debug!(slug = %article.slug, "generating HTML for article");

        let mut ctx = TemplateContext::new()
            .with_var("title", escape_html(&article.title))
            .with_var("date_iso", article.date_iso())
            .with_var("date_display", escape_html(&article.date_display))
            .with_var("content", &article.html)
            .with_var("bio", self.bio.render());

        if let Some(nav) = post_nav_html(article.previous.as_ref(), article.next.as_ref()) {
            ctx.insert("post_nav", nav);
        }

        let inner_html = self.templates.render("post", &ctx)?;

        let mut base_ctx = self.base_context(&article.title, &article.slug, &inner_html);
        if let Some(desc) = &article.description {
            base_ctx.insert("description", escape_html(desc));
        }

        Ok(self.templates.render("base", &base_ctx)?)
    }

    /// Generate the index page listing `articles` in the given order.
    pub fn generate_index(&self, articles: &[&Article]) -> Result<String> {
        let items_html = articles
            .iter()
            .map(|article| list_item_html(article))
            .collect::<Vec<_>>()
            .join("\n");

        let ctx = TemplateContext::new()
            .with_var("bio", self.bio.render())
            .with_var("items", items_html);
        let inner_html = self.templates.render("list", &ctx)?;

        let title = self.config.site.title.clone();
        let mut base_ctx = self.base_context(&title, "/", &inner_html);
        // The index is titled by the site itself.
        base_ctx.insert("site_title_suffix", "");

        Ok(self.templates.render("base", &base_ctx)?)
    }

    /// Generate the page served for unknown paths.
    pub fn generate_not_found(&self) -> Result<String> {
        let inner_html = self
            .templates
            .render("not_found", &TemplateContext::new())?;
        let base_ctx = self.base_context("Not Found", "/404.html", &inner_html);
        Ok(self.templates.render("base", &base_ctx)?)
    }

    /// Context shared by every page wrapped in the base template.
    fn base_context(&self, title: &str, path: &str, inner_html: &str) -> TemplateContext {
        let site = &self.config.site;

        let mut ctx = TemplateContext::new()
            .with_var("lang", &site.language)
            .with_var("title", escape_html(title))
            .with_var("site_title_suffix", format!(" | {}", escape_html(&site.title)))
            .with_var("canonical_url", self.config.url_for(path))
            .with_var("content", inner_html)
            .with_var("site_title", escape_html(&site.title))
            .with_var("author", AUTHOR.name)
            .with_var("year", Utc::now().year().to_string())
            .with_var("scroll_up", self.scroll_up.mount());

        if let Some(desc) = &site.description {
            ctx.insert("description", escape_html(desc));
        }

        if self.config.rss.enabled {
            ctx.insert(
                "feed_link",
                format!(
                    r#"<link rel="alternate" type="application/rss+xml" title="{}" href="{}">"#,
                    escape_html(&site.title),
                    self.config.url_for("rss.xml")
                ),
            );
        }

        ctx
    }

    /// Get the output path for a slug.
    ///
    /// Only plain segments are kept, so the result always lies under `output_dir`.
    #[must_use]
    pub fn output_path(&self, slug: &str, output_dir: &Path) -> PathBuf {
        let relative: PathBuf = Path::new(slug.trim_matches('/'))
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();

        output_dir.join(relative).join("index.html")
    }
}

/// Generate HTML for an index list item.
pub fn list_item_html(article: &Article) -> String {
    format!(
        r#"<li class="post-item">
    <h3><a href="{}">{}</a></h3>
    <time datetime="{}">{}</time>
    <p>{}</p>
</li>"#,
        escape_html(&article.slug),
        escape_html(&article.title),
        article.date_iso(),
        escape_html(&article.date_display),
        escape_html(&article.excerpt(EXCERPT_CHARS)),
    )
}

/// Previous/next links under an article, if it has any neighbours.
pub fn post_nav_html(previous: Option<&NavLink>, next: Option<&NavLink>) -> Option<String> {
    if previous.is_none() && next.is_none() {
        return None;
    }

    let previous_html = previous
        .map(|link| {
            format!(
                r#"<a href="{}" rel="prev">← {}</a>"#,
                escape_html(&link.slug),
                escape_html(&link.title)
            )
        })
        .unwrap_or_default();
    let next_html = next
        .map(|link| {
            format!(
                r#"<a href="{}" rel="next">{} →</a>"#,
                escape_html(&link.slug),
                escape_html(&link.title)
            )
        })
        .unwrap_or_default();

    Some(format!(
        r#"<ul class="post-nav">
    <li>{previous_html}</li>
    <li>{next_html}</li>
</ul>"#
    ))
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
