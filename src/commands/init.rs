//! Initialize a new blog site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    let defaults = SiteConfig::default();
    let content_dir = target_dir.join(&defaults.content_dir);
    fs::create_dir_all(&content_dir)?;

    let config_content = format!(
        r#"# Site
title: {title}
description: ''
author: {author}
url: {url}

# Content
content_dir: {content_dir}
home_limit: {home_limit}
date_format: '{date_format}'

# Markdown
markdown:
  # Escape raw HTML in post bodies. Enable when posts come from
  # authors you do not fully trust.
  sanitize: false
  highlight:
    enable: true
    theme: {theme}
    line_number: false
"#,
        title = defaults.title,
        author = defaults.author,
        url = defaults.url,
        content_dir = defaults.content_dir,
        home_limit = defaults.home_limit,
        date_format = defaults.date_format,
        theme = defaults.markdown.highlight.theme,
    );

    fs::write(&config_path, config_content)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
category: about-me
tags:
  - welcome
description: The first post of this blog
---

Welcome! This post lives in `{}`. Every markdown file under that
directory, at any depth, becomes a post named after its file.

## Front-matter

| key         | meaning                                          |
|-------------|--------------------------------------------------|
| title       | post title                                       |
| date        | publication date, e.g. 2024-06-01                |
| category    | learning-notes, troubleshooting, project, about-me |
| tags        | list of tags                                     |
| description | one-line summary                                 |
| thumbnail   | image URL                                        |

## Writing a new post

```bash
$ folio new "My New Post" --category project
```
"#,
        now.format("%Y-%m-%d %H:%M:%S"),
        defaults.content_dir
    );

    fs::write(content_dir.join("hello-world.md"), sample_post)?;
    tracing::info!("Created {:?}", content_dir.join("hello-world.md"));

    Ok(())
}
