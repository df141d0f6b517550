//! Content module - loads site data from disk and renders entry bodies

pub mod loader;
mod markdown;

pub use loader::{ContentLoader, DataError};
pub use markdown::MarkdownRenderer;
