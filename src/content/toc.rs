//! Heading outline of a rendered post

use pulldown_cmark::HeadingLevel;
use serde::{Deserialize, Serialize};

/// Shallowest heading level listed in the outline
pub const MIN_LEVEL: u8 = 2;
/// Deepest heading level listed in the outline
pub const MAX_LEVEL: u8 = 3;

/// One heading of a post's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Anchor id of the heading element
    pub id: String,
    /// Plain text of the heading
    pub text: String,
    /// Heading level (2 for `<h2>`, 3 for `<h3>`)
    pub level: u8,
}

impl TocEntry {
    /// Nesting depth below the outline's top level
    pub fn indent(&self) -> usize {
        usize::from(self.level.saturating_sub(MIN_LEVEL))
    }
}

/// Whether headings of this level belong in the outline
pub fn is_outlined(level: HeadingLevel) -> bool {
    (MIN_LEVEL..=MAX_LEVEL).contains(&(level as u8))
}

/// Anchor id for the `index`-th outlined heading that has no explicit id
pub fn heading_id(index: usize) -> String {
    format!("heading-{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outlined_levels() {
        assert!(!is_outlined(HeadingLevel::H1));
        assert!(is_outlined(HeadingLevel::H2));
        assert!(is_outlined(HeadingLevel::H3));
        assert!(!is_outlined(HeadingLevel::H4));
    }

    #[test]
    fn test_indent() {
        let entry = TocEntry {
            id: heading_id(4),
            text: "Setup".to_string(),
            level: 3,
        };
        assert_eq!(entry.id, "heading-4");
        assert_eq!(entry.indent(), 1);
    }
}
