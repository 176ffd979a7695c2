//! folio: a file-backed markdown content store for a personal blog
//!
//! Posts live as markdown files (with YAML or TOML front-matter) anywhere
//! under a content root. The [`content::PostRepository`] discovers them,
//! orders them newest first and answers the queries a blog front-end needs:
//! the home feed, category listings, post detail with a heading outline and
//! previous/next navigation.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::PostRepository;

/// Name of the site configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A blog site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root holding the markdown posts
    pub content_dir: PathBuf,
}

impl Folio {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);

        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// Query surface over this site's posts
    pub fn repository(&self) -> PostRepository {
        tracing::debug!("Opening content root {:?}", self.content_dir);
        PostRepository::open(&self.content_dir, &self.config.markdown)
    }
}
