//! Post categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of categories a post can belong to
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// New concepts and things learned along the way
    #[default]
    LearningNotes,
    /// Write-ups of problems and how they were solved
    Troubleshooting,
    /// Projects built or maintained
    Project,
    /// The author's introduction
    AboutMe,
}

impl Category {
    /// All categories in navigation order
    pub const ALL: [Category; 4] = [
        Category::AboutMe,
        Category::LearningNotes,
        Category::Troubleshooting,
        Category::Project,
    ];

    /// Canonical identifier, as written in front-matter
    pub fn slug(&self) -> &'static str {
        match self {
            Category::LearningNotes => "learning-notes",
            Category::Troubleshooting => "troubleshooting",
            Category::Project => "project",
            Category::AboutMe => "about-me",
        }
    }

    /// Display label used by the blog's navigation
    pub fn label(&self) -> &'static str {
        match self {
            Category::LearningNotes => "학습내용",
            Category::Troubleshooting => "트러블슈팅",
            Category::Project => "프로젝트",
            Category::AboutMe => "자기소개",
        }
    }

    /// URL segment of the category page
    pub fn route(&self) -> &'static str {
        match self {
            Category::LearningNotes => "learning",
            Category::Troubleshooting => "troubleshooting",
            Category::Project => "projects",
            Category::AboutMe => "about",
        }
    }

    /// Match a front-matter value against slugs, routes and labels
    pub fn parse(value: &str) -> Option<Category> {
        let value = value.trim();
        Self::ALL.into_iter().find(|c| {
            value.eq_ignore_ascii_case(c.slug())
                || value.eq_ignore_ascii_case(c.route())
                || value == c.label()
        })
    }

    /// Resolve an optional front-matter value, falling back to the default
    pub fn from_front_matter(value: Option<&str>) -> Category {
        match value {
            Some(raw) => Self::parse(raw).unwrap_or_else(|| {
                tracing::debug!("Unknown category {:?}, using {}", raw, Category::default());
                Category::default()
            }),
            None => Category::default(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let known: Vec<_> = Self::ALL.iter().map(|c| c.slug()).collect();
            format!("unknown category '{}'. Available: {}", s, known.join(", "))
        })
    }
}
