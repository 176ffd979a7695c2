//! List site content

use anyhow::Result;
use std::io::Write;

use crate::content::{Category, PostSummary};
use crate::Folio;

/// Filters for the post listing
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub category: Option<Category>,
    pub limit: Option<usize>,
    pub json: bool,
}

/// List posts, newest first
pub fn posts<W: Write>(folio: &Folio, options: &ListOptions, out: &mut W) -> Result<()> {
    let repo = folio.repository();
    let posts = match (options.category, options.limit) {
        (Some(category), limit) => {
            let mut posts = repo.list_summaries_by_category(category);
            if let Some(limit) = limit {
                posts.truncate(limit);
            }
            posts
        }
        (None, Some(limit)) => repo.list_recent(limit),
        (None, None) => repo.list_all_summaries(),
    };

    if options.json {
        serde_json::to_writer_pretty(&mut *out, &posts)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Posts ({}):", posts.len())?;
    for post in &posts {
        writeln!(out, "  {}", summary_line(folio, post))?;
    }
    Ok(())
}

/// Print every slug, one per line
pub fn slugs<W: Write>(folio: &Folio, out: &mut W) -> Result<()> {
    for slug in folio.repository().list_all_slugs() {
        writeln!(out, "{}", slug)?;
    }
    Ok(())
}

/// Print post counts per category
pub fn categories<W: Write>(folio: &Folio, out: &mut W) -> Result<()> {
    let groups = folio.repository().group_by_category();
    writeln!(out, "Categories ({}):", groups.len())?;
    for (category, posts) in groups {
        writeln!(
            out,
            "  {} [{}] ({})",
            category.label(),
            category.slug(),
            posts.len()
        )?;
    }
    Ok(())
}

/// Print tag usage counts, most used first
pub fn tags<W: Write>(folio: &Folio, out: &mut W) -> Result<()> {
    let mut tags: Vec<_> = folio.repository().tag_counts().into_iter().collect();
    // Stable: ties keep first-seen order
    tags.sort_by(|a, b| b.1.cmp(&a.1));

    writeln!(out, "Tags ({}):", tags.len())?;
    for (tag, count) in tags {
        writeln!(out, "  {} ({})", tag, count)?;
    }
    Ok(())
}

/// One-line description of a post
pub(crate) fn summary_line(folio: &Folio, post: &PostSummary) -> String {
    format!(
        "{} - {} [{}] ({})",
        post.date.format(&folio.config.date_format),
        post.title,
        post.category,
        post.slug
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, Folio) {
        let dir = TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        let posts = [
            ("a.md", "2024-01-01", "project", "[rust]"),
            ("nested/b.md", "2024-06-01", "learning-notes", "[rust, web]"),
            ("c.md", "2024-03-01", "project", "[]"),
        ];
        for (path, date, category, tags) in posts {
            let file = folio.content_dir.join(path);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(
                file,
                format!("---\ntitle: T {path}\ndate: {date}\ncategory: {category}\ntags: {tags}\n---\nbody\n"),
            )
            .unwrap();
        }
        (dir, folio)
    }

    fn output<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_list_posts() {
        let (_dir, folio) = site();
        let text = output(|out| posts(&folio, &ListOptions::default(), out));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Posts (3):");
        assert!(lines[1].starts_with("  2024-06-01 - T nested/b.md [learning-notes] (b)"));
        assert!(lines[3].contains("(a)"));
    }

    #[test]
    fn test_list_recent_posts() {
        let (_dir, folio) = site();
        let options = ListOptions {
            limit: Some(2),
            ..Default::default()
        };
        let text = output(|out| posts(&folio, &options, out));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Posts (2):");
        assert!(lines[1].ends_with("(b)"));
        assert!(lines[2].ends_with("(c)"));
    }

    #[test]
    fn test_list_posts_filtered_json() {
        let (_dir, folio) = site();
        let options = ListOptions {
            category: Some(Category::Project),
            limit: Some(1),
            json: true,
        };
        let text = output(|out| posts(&folio, &options, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["slug"], "c");
    }

    #[test]
    fn test_categories_and_tags() {
        let (_dir, folio) = site();

        let text = output(|out| categories(&folio, out));
        assert!(text.contains("Categories (2):"));
        assert!(text.contains("프로젝트 [project] (2)"));

        let text = output(|out| tags(&folio, out));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["Tags (2):", "  rust (2)", "  web (1)"]);
    }

    #[test]
    fn test_slugs() {
        let (_dir, folio) = site();
        let text = output(|out| slugs(&folio, out));
        let mut listed: Vec<_> = text.lines().collect();
        listed.sort();
        assert_eq!(listed, vec!["a", "b", "c"]);
    }
}
