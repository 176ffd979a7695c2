//! Post repository - discovers, parses and indexes posts under a content root

use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;

use super::error::{ContentError, Result};
use super::source::{ContentSource, FsSource, SourceFile};
use super::{Adjacent, Category, FrontMatter, MarkdownRenderer, Post, PostSummary};
use crate::config::MarkdownConfig;

/// Read-only query surface over a content tree.
///
/// Nothing is cached: every query walks the source again, so results always
/// reflect the tree as it is at call time.
pub struct PostRepository<S = FsSource> {
    source: Arc<S>,
    renderer: Arc<MarkdownRenderer>,
}

impl<S> Clone for PostRepository<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

impl PostRepository<FsSource> {
    /// Repository over a directory on disk
    pub fn open<P: AsRef<Path>>(root: P, markdown: &MarkdownConfig) -> Self {
        Self::new(
            FsSource::new(root),
            MarkdownRenderer::from_config(markdown),
        )
    }
}

impl<S: ContentSource + 'static> PostRepository<S> {
    pub fn new(source: S, renderer: MarkdownRenderer) -> Self {
        Self {
            source: Arc::new(source),
            renderer: Arc::new(renderer),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Summaries of every post, newest first
    pub fn list_all_summaries(&self) -> Vec<PostSummary> {
        let mut posts: Vec<PostSummary> = self
            .discover()
            .iter()
            .filter_map(|file| match self.load_summary(file) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", file.path, e);
                    None
                }
            })
            .collect();

        // Stable sort: equal dates keep traversal order
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        posts
    }

    /// Summaries in one category, newest first
    pub fn list_summaries_by_category(&self, category: Category) -> Vec<PostSummary> {
        self.list_all_summaries()
            .into_iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// The newest `limit` posts, for the home feed
    pub fn list_recent(&self, limit: usize) -> Vec<PostSummary> {
        let mut posts = self.list_all_summaries();
        posts.truncate(limit);
        posts
    }

    /// Every post identifier, in traversal order, without parsing
    pub fn list_all_slugs(&self) -> Vec<String> {
        self.discover().into_iter().map(|f| f.slug).collect()
    }

    /// The older and newer neighbours of `slug`
    pub fn get_adjacent(&self, slug: &str) -> Adjacent {
        Adjacent::find(&self.list_all_summaries(), slug)
    }

    /// Posts grouped by category, groups ordered by their newest post
    pub fn group_by_category(&self) -> Vec<(Category, Vec<PostSummary>)> {
        let mut groups: IndexMap<Category, Vec<PostSummary>> = IndexMap::new();
        for post in self.list_all_summaries() {
            groups.entry(post.category).or_default().push(post);
        }
        groups.into_iter().collect()
    }

    /// Tag usage counts, in order of first appearance in the index
    pub fn tag_counts(&self) -> IndexMap<String, usize> {
        let mut tags: IndexMap<String, usize> = IndexMap::new();
        for post in self.list_all_summaries() {
            for tag in post.tags {
                *tags.entry(tag).or_insert(0) += 1;
            }
        }
        tags
    }

    /// Load and render a single post.
    ///
    /// Returns `None` when no file has this slug or when the file cannot be
    /// read or parsed; the cause is logged.
    pub async fn get_post(&self, slug: &str) -> Option<Post> {
        let repo = self.clone();
        let slug = slug.to_string();

        match tokio::task::spawn_blocking(move || repo.find_post(&slug)).await {
            Ok(post) => post,
            Err(e) => {
                tracing::error!("Post rendering task failed: {}", e);
                None
            }
        }
    }

    /// Load and render several posts concurrently.
    ///
    /// Slugs that do not resolve to a readable post are skipped; the
    /// remaining posts keep the order of `slugs`.
    pub async fn get_posts<T: AsRef<str>>(&self, slugs: &[T]) -> Vec<Post> {
        let files = self.discover();
        let mut tasks = JoinSet::new();

        for (order, slug) in slugs.iter().enumerate() {
            let slug = slug.as_ref();
            let Some(file) = files.iter().find(|f| f.slug == slug).cloned() else {
                tracing::debug!("Post not found: {}", slug);
                continue;
            };
            let repo = self.clone();
            tasks.spawn_blocking(move || {
                let result = repo.load_post(&file);
                (order, file, result)
            });
        }

        let mut posts = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((order, _, Ok(post))) => posts.push((order, post)),
                Ok((_, file, Err(e))) => {
                    tracing::error!("Error reading post {}: {}", file.slug, e);
                }
                Err(e) => tracing::error!("Post rendering task failed: {}", e),
            }
        }

        posts.sort_by_key(|(order, _)| *order);
        posts.into_iter().map(|(_, post)| post).collect()
    }

    /// Markdown files with unique slugs, in traversal order.
    ///
    /// When several files share a slug the first one found wins and the
    /// rest are left out of the index.
    fn discover(&self) -> Vec<SourceFile> {
        if !self.source.exists() {
            return Vec::new();
        }

        let mut seen = HashSet::new();
        self.source
            .list_markdown()
            .into_iter()
            .filter(|file| {
                let fresh = seen.insert(file.slug.clone());
                if !fresh {
                    tracing::warn!(
                        "Duplicate slug {:?} at {:?}, keeping the first file found",
                        file.slug,
                        file.path
                    );
                }
                fresh
            })
            .collect()
    }

    fn read(&self, file: &SourceFile) -> Result<String> {
        self.source.read(file).map_err(|source| ContentError::Io {
            path: file.path.clone(),
            source,
        })
    }

    fn load_summary(&self, file: &SourceFile) -> Result<PostSummary> {
        let content = self.read(file)?;
        let (fm, _) = FrontMatter::parse(&content)?;
        Ok(PostSummary::from_front_matter(&file.slug, &fm))
    }

    fn load_post(&self, file: &SourceFile) -> Result<Post> {
        let content = self.read(file)?;
        let (fm, body) = FrontMatter::parse(&content)?;
        let summary = PostSummary::from_front_matter(&file.slug, &fm);
        let rendered = self.renderer.render(body);

        Ok(Post {
            summary,
            content: rendered.html,
            toc: rendered.toc,
        })
    }

    fn find_post(&self, slug: &str) -> Option<Post> {
        let Some(file) = self.discover().into_iter().find(|f| f.slug == slug) else {
            tracing::debug!("Post not found: {}", slug);
            return None;
        };

        match self.load_post(&file) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::error!("Error reading post {}: {}", slug, e);
                None
            }
        }
    }
}
