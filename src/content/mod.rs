//! Content module - discovers, parses and renders posts

mod category;
mod error;
mod frontmatter;
mod markdown;
mod post;
pub mod repository;
pub mod source;
pub mod toc;

pub use category::Category;
pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use markdown::{MarkdownRenderer, Rendered};
pub use post::{Adjacent, Post, PostSummary, UNTITLED};
pub use repository::PostRepository;
pub use source::{ContentSource, FsSource, SourceFile};
pub use toc::TocEntry;
