//! Content module - discovers, validates and queries posts

pub mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod query;

pub use frontmatter::{FrontMatter, FrontmatterError, PostFrontmatter};
pub use loader::ContentLoader;
pub use markdown::{strip_mdx_module_lines, MarkdownRenderer};
pub use post::{count_words, reading_time, PostMeta};
