//! Show a single post

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use super::list::summary_line;
use crate::content::{Adjacent, Post};
use crate::Folio;

#[derive(Serialize)]
struct PostDetail<'a> {
    #[serde(flatten)]
    post: &'a Post,
    adjacent: &'a Adjacent,
}

/// Print a rendered post with its neighbours
pub async fn run<W: Write>(
    folio: &Folio,
    slug: &str,
    toc_only: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let repo = folio.repository();
    let Some(post) = repo.get_post(slug).await else {
        anyhow::bail!("Post not found: {}", slug);
    };
    let adjacent = repo.get_adjacent(slug);

    if json {
        let detail = PostDetail {
            post: &post,
            adjacent: &adjacent,
        };
        serde_json::to_writer_pretty(&mut *out, &detail)?;
        writeln!(out)?;
        return Ok(());
    }

    if toc_only {
        for entry in &post.toc {
            writeln!(
                out,
                "{}- {} (#{})",
                "  ".repeat(entry.indent()),
                entry.text,
                entry.id
            )?;
        }
        return Ok(());
    }

    writeln!(out, "{}", post.title)?;
    writeln!(
        out,
        "{} | {} | {}",
        post.date.format(&folio.config.date_format),
        post.category.label(),
        post.tags.join(", ")
    )?;
    if !post.description.is_empty() {
        writeln!(out, "{}", post.description)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", post.content)?;
    write_adjacent(folio, &adjacent, out)
}

/// Print the older and newer neighbours of a post
pub fn adjacent<W: Write>(folio: &Folio, slug: &str, out: &mut W) -> Result<()> {
    let index = folio.repository().list_all_summaries();
    if !index.iter().any(|p| p.slug == slug) {
        anyhow::bail!("Post not found: {}", slug);
    }
    write_adjacent(folio, &Adjacent::find(&index, slug), out)
}

fn write_adjacent<W: Write>(folio: &Folio, adjacent: &Adjacent, out: &mut W) -> Result<()> {
    match &adjacent.previous {
        Some(post) => writeln!(out, "previous: {}", summary_line(folio, post))?,
        None => writeln!(out, "previous: -")?,
    }
    match &adjacent.next {
        Some(post) => writeln!(out, "next: {}", summary_line(folio, post))?,
        None => writeln!(out, "next: -")?,
    }
    Ok(())
}
