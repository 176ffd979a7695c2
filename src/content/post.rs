//! Post models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::LazyLock;

use super::{Category, FrontMatter, TocEntry};

/// Title used when a post does not declare one
pub const UNTITLED: &str = "Untitled";

/// Date given to posts without a usable one, fixed for the life of the process
static PROCESS_TIME: LazyLock<DateTime<Local>> = LazyLock::new(Local::now);

/// Metadata of a post, without its rendered body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Identifier derived from the file name
    pub slug: String,

    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    pub category: Category,

    /// Tags in authored order
    pub tags: Vec<String>,

    pub description: String,

    /// Thumbnail image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl PostSummary {
    /// Apply the default table to a parsed front-matter header.
    ///
    /// | field       | default                    |
    /// |-------------|----------------------------|
    /// | title       | `"Untitled"`               |
    /// | date        | process start time         |
    /// | category    | `Category::LearningNotes`  |
    /// | tags        | empty                      |
    /// | description | empty                      |
    /// | thumbnail   | none                       |
    pub fn from_front_matter(slug: &str, fm: &FrontMatter) -> Self {
        let date = match (&fm.date, fm.parse_date()) {
            (_, Some(date)) => date,
            (Some(raw), None) => {
                tracing::warn!(
                    "Post {} has an unrecognized date {:?}, using process time",
                    slug,
                    raw
                );
                *PROCESS_TIME
            }
            (None, None) => *PROCESS_TIME,
        };

        Self {
            slug: slug.to_string(),
            title: fm.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
            date,
            category: Category::from_front_matter(fm.category.as_deref()),
            tags: fm.tags.clone(),
            description: fm.description.clone().unwrap_or_default(),
            thumbnail: fm.thumbnail.clone(),
        }
    }
}

/// A post with its body rendered to HTML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub summary: PostSummary,

    /// Rendered HTML content
    pub content: String,

    /// Outline of the post's h2/h3 headings
    pub toc: Vec<TocEntry>,
}

impl Deref for Post {
    type Target = PostSummary;

    fn deref(&self) -> &Self::Target {
        &self.summary
    }
}

/// Neighbours of a post in the date-descending index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Adjacent {
    /// The older neighbour ("previous post")
    pub previous: Option<PostSummary>,
    /// The newer neighbour ("next post")
    pub next: Option<PostSummary>,
}

impl Adjacent {
    /// Locate `slug` in a date-descending index
    pub fn find(index: &[PostSummary], slug: &str) -> Self {
        let Some(pos) = index.iter().position(|p| p.slug == slug) else {
            return Self::default();
        };

        Self {
            previous: index.get(pos + 1).cloned(),
            next: pos.checked_sub(1).and_then(|i| index.get(i)).cloned(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary(slug: &str, day: u32) -> PostSummary {
        PostSummary {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            date: Local.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            category: Category::default(),
            tags: Vec::new(),
            description: String::new(),
            thumbnail: None,
        }
    }

    #[test]
    fn test_defaults_for_empty_front_matter() {
        let now = Local::now();
        let s = PostSummary::from_front_matter("bare", &FrontMatter::default());
        assert_eq!(s.slug, "bare");
        assert_eq!(s.title, UNTITLED);
        assert!(s.date <= now);
        assert_eq!(s.category, Category::LearningNotes);
        assert!(s.tags.is_empty());
        assert_eq!(s.description, "");
        assert_eq!(s.thumbnail, None);
    }

    #[test]
    fn test_missing_dates_share_one_timestamp() {
        let fm = FrontMatter {
            date: Some("someday".to_string()),
            ..Default::default()
        };
        let unparsable = PostSummary::from_front_matter("x", &fm);
        let absent = PostSummary::from_front_matter("y", &FrontMatter::default());
        assert_eq!(unparsable.date, absent.date);
        assert_eq!(
            absent.date,
            PostSummary::from_front_matter("y", &FrontMatter::default()).date
        );
        assert!(absent.date <= Local::now());
    }

    #[test]
    fn test_adjacent_directionality() {
        // newest first
        let index = vec![summary("c", 3), summary("b", 2), summary("a", 1)];

        let middle = Adjacent::find(&index, "b");
        assert_eq!(middle.previous.unwrap().slug, "a");
        assert_eq!(middle.next.unwrap().slug, "c");

        let newest = Adjacent::find(&index, "c");
        assert!(newest.next.is_none());
        assert_eq!(newest.previous.unwrap().slug, "b");

        let oldest = Adjacent::find(&index, "a");
        assert!(oldest.previous.is_none());
        assert_eq!(oldest.next.unwrap().slug, "b");

        assert!(Adjacent::find(&index, "missing").is_empty());
        assert!(Adjacent::find(&index[..1], "c").is_empty());
    }

    #[test]
    fn test_post_serializes_flat() {
        let post = Post {
            summary: summary("a", 1),
            content: "<p>hi</p>".to_string(),
            toc: Vec::new(),
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["slug"], "a");
        assert_eq!(value["category"], "learning-notes");
        assert_eq!(value["content"], "<p>hi</p>");
        assert!(value.get("thumbnail").is_none());
        assert_eq!(post.title, "A");
    }
}
