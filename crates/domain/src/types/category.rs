//! Activity categories
//!
//! Closed label set produced by the categorizer. Rule order and keyword sets
//! are a system contract; the display colors are fixed per category.

use serde::{Deserialize, Serialize};

/// Category assigned to an activity sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Programming,
    Communication,
    Browsing,
    Entertainment,
    Email,
    FileManagement,
    Games,
    Media,
    Other,
}

impl Category {
    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Programming => "Programming",
            Self::Communication => "Communication",
            Self::Browsing => "Browsing",
            Self::Entertainment => "Entertainment",
            Self::Email => "Email",
            Self::FileManagement => "File Management",
            Self::Games => "Games",
            Self::Media => "Media",
            Self::Other => "Other",
        }
    }

    /// Fixed display color (hex). Unknown categories fall back to a neutral
    /// gray, which doubles as the `Other` color.
    pub fn color(self) -> &'static str {
        match self {
            Self::Programming => "#22c55e",
            Self::Communication => "#3b82f6",
            Self::Browsing => "#f59e0b",
            Self::Entertainment => "#ef4444",
            Self::Email => "#8b5cf6",
            Self::FileManagement => "#06b6d4",
            Self::Games => "#ec4899",
            Self::Media => "#f97316",
            Self::Other => "#64748b",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_colors_are_stable() {
        assert_eq!(Category::Programming.label(), "Programming");
        assert_eq!(Category::FileManagement.label(), "File Management");
        assert_eq!(Category::Programming.color(), "#22c55e");
        assert_eq!(Category::Other.color(), "#64748b");
    }
}
