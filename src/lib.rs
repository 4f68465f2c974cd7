//! apidoc — render a navigable API reference from parsed documentation
//! comments.
//!
//! Comments come in as the flat JSON list a documentation-comment parser
//! emits. The [`pipeline`] resolves each comment's namespace from its source
//! directory, repairs the records ([`normalize`]) and groups them into a
//! namespace [`tree`]. [`render`] turns the result into a page.

pub mod assets;
pub mod config;
pub mod format;
pub mod link;
pub mod markdown;
pub mod model;
pub mod namespace;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod tree;

pub use config::Config;
pub use model::Comment;
pub use pipeline::RenderContext;
