//! Rendering layer: turns the registry into the final Markdown document.

pub mod markdown;

pub use markdown::render_markdown;
