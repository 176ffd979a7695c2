//! Create a new post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::content::Category;
use crate::Folio;

/// Front-matter written into a freshly created post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    category: Category,
    tags: &'a [String],
    description: &'a str,
}

/// Create a new post under the content root and return its path.
///
/// `path` is a sub-directory of the content root. Fails when the file
/// exists or when another post anywhere in the tree already uses the slug.
pub fn create_post(
    folio: &Folio,
    title: &str,
    category: Category,
    tags: &[String],
    path: Option<&str>,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    if folio.repository().list_all_slugs().contains(&slug) {
        anyhow::bail!("A post with slug '{}' already exists", slug);
    }

    let target_dir = match path {
        Some(p) => folio.content_dir.join(p),
        None => folio.content_dir.clone(),
    };
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold = Scaffold {
        title,
        date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        category,
        tags,
        description: "",
    };
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&scaffold)?);

    fs::write(&file_path, content)?;
    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}
