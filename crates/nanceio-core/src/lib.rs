//! nance.io Core Library
//!
//! Core types, configuration, and error handling for the nance.io blog generator.

pub mod author;
pub mod config;
pub mod content;
pub mod error;

pub use author::{AUTHOR, AuthorProfile};
pub use config::Config;
pub use content::{Article, NavLink, PageBundle};
pub use error::{CoreError, Result, SlugError};
