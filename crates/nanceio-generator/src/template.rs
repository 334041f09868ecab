//! HTML template system for page generation.
//!
//! Plain `{{ variable }}` interpolation; no template engine dependency.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with initial variables.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Check if a variable exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

/// A simple template that supports variable interpolation.
///
/// Variables are written `{{ name }}`; `{{ name? }}` renders empty when unset.
/// Substituted values are not scanned again.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();
            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped.trim_end(), true),
                None => (var_name, false),
            };

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            };

            result.replace_range(start..end, &value);
            pos = start + value.len();
        }

        Ok(result)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with default templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(Template::new("base", DEFAULT_BASE_TEMPLATE));
        registry.register(Template::new("post", DEFAULT_POST_TEMPLATE));
        registry.register(Template::new("list", DEFAULT_LIST_TEMPLATE));
        registry.register(Template::new("not_found", DEFAULT_NOT_FOUND_TEMPLATE));
        registry
    }

    /// Register a template, replacing any with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Default base HTML template.
pub const DEFAULT_BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}{{ site_title_suffix? }}</title>
    <meta name="description" content="{{ description? }}">
    <meta name="author" content="{{ author? }}">
    <link rel="canonical" href="{{ canonical_url }}">
    {{ feed_link? }}
    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?family=Merriweather:ital,wght@0,400;0,700;1,400&family=Montserrat:wght@700;900&display=swap" rel="stylesheet">
    <style>
        :root {
            --color-text: hsla(0, 0%, 0%, 0.9);
            --color-muted: hsla(0, 0%, 0%, 0.6);
            --color-link: #bf79db;
            --color-border: hsla(0, 0%, 0%, 0.2);
            --color-code-bg: hsla(0, 0%, 0%, 0.04);
        }

        *, *::before, *::after { box-sizing: border-box; }

        html { font-size: 16px; }

        body {
            margin: 0;
            font-family: 'Merriweather', Georgia, serif;
            line-height: 1.75;
            color: var(--color-text);
            -webkit-font-smoothing: antialiased;
        }

        .container {
            max-width: 42rem;
            margin: 0 auto;
            padding: 2.625rem 1.3125rem;
        }

        h1, h2, h3, h4, .site-title {
            font-family: 'Montserrat', sans-serif;
            font-weight: 900;
            line-height: 1.1;
        }

        .site-title {
            font-size: 2.5rem;
            margin: 0 0 2.625rem;
        }

        .site-title a, .post-list h3 a {
            color: inherit;
            text-decoration: none;
            box-shadow: none;
        }

        a {
            color: var(--color-link);
            text-decoration: none;
            box-shadow: 0 1px 0 0 currentColor;
        }

        time {
            display: block;
            font-size: 0.875rem;
            color: var(--color-muted);
            margin: -1rem 0 1.75rem;
        }

        code {
            font-size: 0.85em;
            background-color: var(--color-code-bg);
            padding: 0.1em 0.3em;
            border-radius: 0.3em;
        }

        pre {
            overflow-x: auto;
            padding: 1rem;
            background-color: var(--color-code-bg);
            border-radius: 0.3em;
        }

        pre code { padding: 0; background: none; }

        blockquote {
            margin-left: -1.75rem;
            padding-left: 1.4rem;
            border-left: 0.35rem solid var(--color-link);
            color: var(--color-muted);
            font-style: italic;
        }

        img { max-width: 100%; }

        hr {
            border: none;
            height: 1px;
            background: var(--color-border);
            margin-bottom: 1.75rem;
        }

        .post-list ul, .post-nav {
            list-style: none;
            padding: 0;
        }

        .post-list li { margin-bottom: 2.625rem; }

        .post-list h3 { margin-bottom: 0.4375rem; }

        .post-list time { margin: 0; }

        .post-nav {
            display: flex;
            flex-wrap: wrap;
            justify-content: space-between;
        }

        footer {
            font-size: 0.875rem;
            color: var(--color-muted);
        }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1 class="site-title"><a href="/">{{ site_title }}</a></h1>
        </header>
        <main>
            {{ content }}
        </main>
        <footer>
            <p>&copy; {{ year }} {{ site_title }}</p>
        </footer>
    </div>
    {{ scroll_up? }}
</body>
</html>"##;

/// Default post template (for articles).
pub const DEFAULT_POST_TEMPLATE: &str = r#"<article class="post">
    <h1>{{ title }}</h1>
    <time datetime="{{ date_iso }}">{{ date_display }}</time>
    <div class="content">
        {{ content }}
    </div>
    <hr>
    {{ bio }}
    {{ post_nav? }}
</article>"#;

/// Default list template (for the index page).
pub const DEFAULT_LIST_TEMPLATE: &str = r#"{{ bio }}
<section class="post-list">
    <ul>
        {{ items }}
    </ul>
</section>"#;

/// Default template for unknown paths.
pub const DEFAULT_NOT_FOUND_TEMPLATE: &str = r#"<section class="not-found">
    <h1>Not Found</h1>
    <p>You just hit a route that doesn&#39;t exist... the sadness.</p>
    <p><a href="/">Back to all posts</a></p>
</section>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_simple_render() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let ctx = TemplateContext::new().with_var("name", "World");

        assert_eq!(template.render(&ctx).unwrap(), "Hello, World!");
        assert_eq!(template.name(), "test");
    }

    #[test]
    fn test_template_optional_variable() {
        let template = Template::new("test", "Hello{{ suffix? }}!");

        let result = template.render(&TemplateContext::new()).unwrap();
        assert_eq!(result, "Hello!");

        let ctx = TemplateContext::new().with_var("suffix", ", World");
        assert_eq!(template.render(&ctx).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_template_values_are_not_rescanned() {
        let template = Template::new("test", "<div>{{ body }}</div>");
        let ctx = TemplateContext::new().with_var("body", "function() {{ inner }}");

        assert_eq!(
            template.render(&ctx).unwrap(),
            "<div>function() {{ inner }}</div>"
        );
    }

    #[test]
    fn test_template_missing_required_variable() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let result = template.render(&TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::MissingVariable(name)) if name == "name"));
    }

    #[test]
    fn test_template_unclosed_delimiter() {
        let template = Template::new("test", "Hello, {{ name");
        let result = template.render(&TemplateContext::new());
        assert!(matches!(result, Err(TemplateError::InvalidSyntax(_))));
    }

    #[test]
    fn test_template_registry() {
        let registry = TemplateRegistry::new();

        assert!(registry.get("base").is_some());
        assert!(registry.get("post").is_some());
        assert!(registry.get("list").is_some());
        assert!(registry.get("not_found").is_some());
        assert!(matches!(
            registry.render("nonexistent", &TemplateContext::new()),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_render_base_template() {
        let registry = TemplateRegistry::new();
        let ctx = TemplateContext::new()
            .with_var("lang", "en")
            .with_var("title", "My Page")
            .with_var("canonical_url", "https://nance.io/my-page/")
            .with_var("content", "<p>Hello!</p>")
            .with_var("site_title", "nance.io")
            .with_var("year", "2026");

        let result = registry.render("base", &ctx).unwrap();
        assert!(result.contains("<!DOCTYPE html>"));
        assert!(result.contains("<title>My Page</title>"));
        assert!(result.contains("<p>Hello!</p>"));
        assert!(result.contains("&copy; 2026 nance.io"));
    }
}
