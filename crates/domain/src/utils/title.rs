//! Window-title display helpers

use crate::constants::{MAX_TITLE_LENGTH, TITLE_TRUNCATE_SUFFIX};

/// Truncate long window titles to a maximum length with ellipsis.
#[must_use]
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_LENGTH {
        let prefix: String =
            title.chars().take(MAX_TITLE_LENGTH - TITLE_TRUNCATE_SUFFIX.chars().count()).collect();
        format!("{prefix}{TITLE_TRUNCATE_SUFFIX}")
    } else {
        title.to_string()
    }
}
