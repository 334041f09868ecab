//! Article records and the page bundle wire format they are loaded from.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result, SlugError};

/// Date format used by page bundles, e.g. "October 16, 2017".
pub const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";

/// A serialized page bundle: one article's data plus its navigation context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBundle {
    /// Page query data.
    pub data: BundleData,

    /// Routing context for the page.
    #[serde(rename = "pathContext")]
    pub path_context: PathContext,
}

/// Query data carried by a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleData {
    /// Site metadata snapshot.
    #[serde(default)]
    pub site: Option<SiteNode>,

    /// The rendered article.
    pub markdown_remark: MarkdownRemark,
}

/// Wrapper around site metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteNode {
    /// Site metadata.
    pub site_metadata: SiteMetadata,
}

/// Site title and author as recorded when the bundle was produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Rendered article node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownRemark {
    /// Opaque source identifier.
    #[serde(default)]
    pub id: Option<String>,

    /// Rendered HTML body.
    pub html: String,

    /// Article frontmatter.
    pub frontmatter: BundleFrontmatter,
}

/// Frontmatter of a bundled article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleFrontmatter {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Slug plus neighbouring articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathContext {
    pub slug: String,

    /// Older neighbour; `false`, `null` or missing when there is none.
    #[serde(default, deserialize_with = "nav_link_or_false")]
    pub previous: Option<BundleNavLink>,

    /// Newer neighbour; `false`, `null` or missing when there is none.
    #[serde(default, deserialize_with = "nav_link_or_false")]
    pub next: Option<BundleNavLink>,
}

/// A neighbouring article as stored in a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleNavLink {
    pub fields: NavFields,
    pub frontmatter: NavFrontmatter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavFields {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavFrontmatter {
    pub title: String,
}

fn nav_link_or_false<'de, D>(deserializer: D) -> std::result::Result<Option<BundleNavLink>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Link(BundleNavLink),
        Flag(bool),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Link(link)) => Some(link),
        Some(Raw::Flag(_)) | None => None,
    })
}

/// Link to another article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Normalized slug, e.g. `/hello/`.
    pub slug: String,

    /// Article title.
    pub title: String,
}

/// A validated article ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Normalized slug, e.g. `/hello/`.
    pub slug: String,

    pub title: String,

    /// Publication date.
    pub date: NaiveDate,

    /// Date as written in the bundle.
    pub date_display: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Rendered HTML body, inserted verbatim.
    pub html: String,

    #[serde(default)]
    pub previous: Option<NavLink>,

    #[serde(default)]
    pub next: Option<NavLink>,

    /// Site title recorded in the bundle.
    #[serde(default)]
    pub site_title: Option<String>,

    /// Author recorded in the bundle.
    #[serde(default)]
    pub author: Option<String>,
}

impl PageBundle {
    /// Parse a bundle from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate this bundle and turn it into an [`Article`].
    ///
    /// `path` is only used for error reporting.
    pub fn into_article(self, path: &Path) -> Result<Article> {
        let remark = self.data.markdown_remark;
        let fm = remark.frontmatter;

        let title = fm.title.trim().to_string();
        if title.is_empty() {
            return Err(CoreError::bundle(path, "title cannot be empty"));
        }

        let slug = normalize_slug(&self.path_context.slug)
            .map_err(|e| CoreError::bundle(path, e.to_string()))?;

        let date = parse_display_date(&fm.date)
            .ok_or_else(|| CoreError::bundle(path, format!("unrecognized date '{}'", fm.date)))?;

        let description = fm.description.filter(|d| !d.trim().is_empty());

        let metadata = self
            .data
            .site
            .map(|site| site.site_metadata)
            .unwrap_or_default();

        Ok(Article {
            slug,
            title,
            date,
            date_display: fm.date.trim().to_string(),
            description,
            html: remark.html,
            previous: self.path_context.previous.and_then(NavLink::from_bundle),
            next: self.path_context.next.and_then(NavLink::from_bundle),
            site_title: metadata.title,
            author: metadata.author,
        })
    }
}

impl NavLink {
    fn from_bundle(link: BundleNavLink) -> Option<Self> {
        Some(Self {
            slug: normalize_slug(&link.fields.slug)
                .inspect_err(|e| {
                    tracing::warn!(slug = %link.fields.slug, error = %e, "dropping neighbour link");
                })
                .ok()?,
            title: link.frontmatter.title,
        })
    }
}

impl Article {
    /// Publication date as `YYYY-MM-DD`.
    pub fn date_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Short text for listings: the description, or the start of the body.
    pub fn excerpt(&self, max_chars: usize) -> String {
        match &self.description {
            Some(desc) => desc.clone(),
            None => truncate_at_word_boundary(strip_html(&self.html).trim(), max_chars),
        }
    }
}

/// Normalize a slug to the `/segment/` form.
///
/// Segments may only hold ASCII letters, digits and `-._~`; `.` and `..`
/// segments are rejected so a slug always maps to a path below the output
/// directory.
pub fn normalize_slug(slug: &str) -> std::result::Result<String, SlugError> {
    let trimmed = slug.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(SlugError::Empty);
    }

    for segment in trimmed.split('/') {
        match segment {
            "" => return Err(SlugError::EmptySegment),
            "." | ".." => return Err(SlugError::RelativeSegment(segment.to_string())),
            _ => {}
        }
        if let Some(c) = segment
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')))
        {
            return Err(SlugError::InvalidChar(c));
        }
    }

    Ok(format!("/{trimmed}/"))
}

/// Parse a bundle date, accepting "October 16, 2017" or "2017-10-16".
pub fn parse_display_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DISPLAY_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

/// Strip HTML tags from content.
pub fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Truncate text at word boundary, respecting UTF-8 character boundaries.
pub fn truncate_at_word_boundary(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let truncated = &text[..cut];

    match truncated.rfind(char::is_whitespace) {
        Some(space) => format!("{}...", truncated[..space].trim_end()),
        None => format!("{truncated}..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r#"{
        "data": {
            "site": { "siteMetadata": { "title": "nance.io", "author": "Jared Nance" } },
            "markdownRemark": {
                "id": "dotnet-core-dependency-injection/index.md",
                "html": "<p>Dependency injection in <code>.Net Core</code>.</p>",
                "frontmatter": { "title": ".Net Core Dependency Injection", "date": "October 16, 2017", "description": null }
            }
        },
        "pathContext": {
            "slug": "/dotnet-core-dependency-injection/",
            "previous": { "fields": { "slug": "/typescript-vs-javascript/" }, "frontmatter": { "title": "TypeScript vs JavaScript" } },
            "next": false
        }
    }"#;

    #[test]
    fn test_bundle_into_article() {
        let bundle = PageBundle::from_json(BUNDLE).expect("parse bundle");
        let article = bundle.into_article(Path::new("di.json")).expect("valid");

        assert_eq!(article.slug, "/dotnet-core-dependency-injection/");
        assert_eq!(article.title, ".Net Core Dependency Injection");
        assert_eq!(article.date, NaiveDate::from_ymd_opt(2017, 10, 16).unwrap());
        assert_eq!(article.date_display, "October 16, 2017");
        assert_eq!(article.date_iso(), "2017-10-16");
        assert!(article.description.is_none());
        assert_eq!(
            article.previous,
            Some(NavLink {
                slug: "/typescript-vs-javascript/".to_string(),
                title: "TypeScript vs JavaScript".to_string(),
            })
        );
        assert!(article.next.is_none());
        assert_eq!(article.site_title.as_deref(), Some("nance.io"));
        assert_eq!(article.author.as_deref(), Some("Jared Nance"));
    }

    #[test]
    fn test_bundle_missing_neighbours_and_site() {
        let json = r#"{
            "data": { "markdownRemark": { "html": "", "frontmatter": { "title": "T", "date": "2016-08-19" } } },
            "pathContext": { "slug": "hangfire", "previous": null }
        }"#;
        let article = PageBundle::from_json(json)
            .unwrap()
            .into_article(Path::new("t.json"))
            .unwrap();

        assert_eq!(article.slug, "/hangfire/");
        assert!(article.previous.is_none());
        assert!(article.next.is_none());
        assert!(article.site_title.is_none());
    }

    #[test]
    fn test_bundle_validation() {
        let mut bundle = PageBundle::from_json(BUNDLE).unwrap();
        bundle.data.markdown_remark.frontmatter.title = "  ".to_string();
        let err = bundle.into_article(Path::new("a.json")).unwrap_err();
        assert!(err.to_string().contains("title cannot be empty"));

        let mut bundle = PageBundle::from_json(BUNDLE).unwrap();
        bundle.path_context.slug = "/".to_string();
        let err = bundle.into_article(Path::new("a.json")).unwrap_err();
        assert!(err.to_string().contains("slug cannot be empty"));

        let mut bundle = PageBundle::from_json(BUNDLE).unwrap();
        bundle.data.markdown_remark.frontmatter.date = "someday".to_string();
        let err = bundle.into_article(Path::new("a.json")).unwrap_err();
        assert!(err.to_string().contains("someday"));
    }

    #[test]
    fn test_empty_description_is_absent() {
        let mut bundle = PageBundle::from_json(BUNDLE).unwrap();
        bundle.data.markdown_remark.frontmatter.description = Some(String::new());
        let article = bundle.into_article(Path::new("a.json")).unwrap();
        assert!(article.description.is_none());
    }

    #[test]
    fn test_parse_display_date() {
        assert_eq!(
            parse_display_date("December 05, 2017"),
            NaiveDate::from_ymd_opt(2017, 12, 5)
        );
        assert_eq!(
            parse_display_date("April 8, 2018"),
            NaiveDate::from_ymd_opt(2018, 4, 8)
        );
        assert_eq!(
            parse_display_date("2016-08-19"),
            NaiveDate::from_ymd_opt(2016, 8, 19)
        );
        assert!(parse_display_date("08/19/2016").is_none());
    }

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("/a/"), Ok("/a/".to_string()));
        assert_eq!(normalize_slug("a"), Ok("/a/".to_string()));
        assert_eq!(normalize_slug(" /a/b "), Ok("/a/b/".to_string()));
        assert_eq!(normalize_slug("/v1.2_x~y/"), Ok("/v1.2_x~y/".to_string()));
        assert_eq!(normalize_slug("//"), Err(SlugError::Empty));
    }

    #[test]
    fn test_normalize_slug_rejects_escaping_paths() {
        assert_eq!(
            normalize_slug("/../../escaped/"),
            Err(SlugError::RelativeSegment("..".to_string()))
        );
        assert_eq!(
            normalize_slug("/a/./b/"),
            Err(SlugError::RelativeSegment(".".to_string()))
        );
        assert_eq!(normalize_slug("/a//b/"), Err(SlugError::EmptySegment));
        assert_eq!(normalize_slug(r#"/a"b/"#), Err(SlugError::InvalidChar('"')));
        assert_eq!(normalize_slug(r"/a\b/"), Err(SlugError::InvalidChar('\\')));
        assert_eq!(normalize_slug("/a b/"), Err(SlugError::InvalidChar(' ')));
    }

    #[test]
    fn test_bundle_with_escaping_slug_is_rejected() {
        let mut bundle = PageBundle::from_json(BUNDLE).unwrap();
        bundle.path_context.slug = "/../../escaped/".to_string();
        let err = bundle.into_article(Path::new("evil.json")).unwrap_err();
        assert!(matches!(err, CoreError::Bundle { .. }));
        assert!(err.to_string().contains("relative segment '..'"));

        let mut bundle = PageBundle::from_json(BUNDLE).unwrap();
        bundle.path_context.previous.as_mut().unwrap().fields.slug = "/../x/".to_string();
        let article = bundle.into_article(Path::new("a.json")).unwrap();
        assert!(article.previous.is_none());
    }

    #[test]
    fn test_excerpt() {
        let article = PageBundle::from_json(BUNDLE)
            .unwrap()
            .into_article(Path::new("a.json"))
            .unwrap();
        assert_eq!(article.excerpt(160), "Dependency injection in .Net Core.");
        assert_eq!(article.excerpt(12), "Dependency...");

        let described = Article {
            description: Some("A summary".to_string()),
            ..article
        };
        assert_eq!(described.excerpt(3), "A summary");
    }

    #[test]
    fn test_truncate_at_word_boundary() {
        let text = "Hello world this is a test";
        assert_eq!(truncate_at_word_boundary(text, 100), text);
        assert_eq!(truncate_at_word_boundary(text, 11), "Hello...");
        assert_eq!(truncate_at_word_boundary(text, 12), "Hello world...");
        assert_eq!(truncate_at_word_boundary("你好世界 Hello", 7), "你好世界...");
    }
}
