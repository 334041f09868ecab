//! RSS feed generation.

use std::io::Write;

use chrono::Utc;
use nanceio_core::{AUTHOR, Article, Config};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use thiserror::Error;
use tracing::debug;

use crate::html::EXCERPT_CHARS;

/// RSS generation errors.
#[derive(Debug, Error)]
pub enum RssError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for RSS operations.
pub type Result<T> = std::result::Result<T, RssError>;

/// RSS feed generator.
#[derive(Debug)]
pub struct RssGenerator {
    config: Config,
}

impl RssGenerator {
    /// Create a new RSS generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate RSS feed XML from articles, which are expected newest first.
    pub fn generate(&self, articles: &[&Article]) -> Result<String> {
        let limit = self.config.rss.limit;
        let items: Vec<Item> = articles
            .iter()
            .take(limit)
            .map(|article| self.article_to_item(article))
            .collect();

        debug!(count = items.len(), limit, "generating RSS feed");

        let site = &self.config.site;
        let channel = ChannelBuilder::default()
            .title(&site.title)
            .link(&site.base_url)
            .description(site.description.as_deref().unwrap_or(&site.title))
            .language(Some(site.language.clone()))
            .last_build_date(Some(Utc::now().to_rfc2822()))
            .items(items)
            .build();

        Ok(channel.to_string())
    }

    fn article_to_item(&self, article: &Article) -> Item {
        let url = self.config.url_for(&article.slug);
        let guid = GuidBuilder::default().value(&url).permalink(true).build();

        let pub_date = article
            .date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().to_rfc2822());

        let description = article
            .description
            .clone()
            .unwrap_or_else(|| article.excerpt(EXCERPT_CHARS));

        let mut builder = ItemBuilder::default();
        builder.title(Some(article.title.clone()));
        builder.link(Some(url));
        builder.guid(Some(guid));
        builder.pub_date(pub_date);
        builder.description(Some(description));
        builder.author(Some(
            article
                .author
                .clone()
                .unwrap_or_else(|| AUTHOR.name.to_string()),
        ));

        builder.build()
    }

    /// Write RSS feed to a writer.
    pub fn write_to<W: Write>(&self, articles: &[&Article], writer: &mut W) -> Result<()> {
        let xml = self.generate(articles)?;
        writer.write_all(xml.as_bytes())?;
        Ok(())
    }
}
