//! nance.io UI Components
//!
//! Presentational components rendered into every page of the blog.
//!
//! # Components
//!
//! - [`Bio`] - Author card with photo, short bio and social links
//! - [`ScrollUp`] - Floating "scroll to top" control shown past a scroll threshold
//!
//! # Example
//!
//! ```
//! use nanceio_ui::{Bio, ScrollUp};
//!
//! let bio = Bio::default().render();
//! assert!(bio.contains("Jared Nance"));
//!
//! let mut scroll_up = ScrollUp::default();
//! assert!(scroll_up.view().is_none());
//! scroll_up.on_scroll(400.0);
//! assert!(scroll_up.view().is_some());
//! ```

pub mod bio;
pub mod scroll_up;
pub mod style;

pub use bio::Bio;
pub use scroll_up::{ScrollBehavior, ScrollUp, Viewport, Visibility};
pub use style::rhythm;
