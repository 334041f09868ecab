//! nance.io Generator Library
//!
//! Static site generation engine for the nance.io blog.
//!
//! # Modules
//!
//! - [`template`] - HTML template system with variable interpolation
//! - [`html`] - HTML generation for articles, the index and the 404 page
//! - [`collector`] - Page bundle collection and organization
//! - [`legacy`] - Import of compiled page bundle scripts
//! - [`rss`] - RSS feed generation
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod collector;
pub mod html;
pub mod legacy;
pub mod rss;
pub mod template;

pub use assets::{AssetManifest, AssetProcessor};
pub use build::{BuildStats, Builder};
pub use collector::{BundleCollector, SiteContent};
pub use html::HtmlGenerator;
pub use legacy::{LegacyError, import_dir, parse_legacy_bundle};
pub use rss::RssGenerator;
pub use template::{Template, TemplateContext, TemplateRegistry};
