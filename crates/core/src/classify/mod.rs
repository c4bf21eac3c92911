//! Categorizer and application-name normalizers
//!
//! Pure, total functions over free-text application names and window titles.
//! Rule order and keyword sets are a system contract: matching is ordered and
//! first-match-wins, so reordering rules changes category assignment (a
//! browser tab titled "meeting" resolves to Communication precisely because
//! the communication rule fires before the browser rule).
//!
//! Two normalizers exist deliberately. The dashboard variant collapses app
//! families into display names and strips `.exe` suffixes; the
//! session-tracking variant strips `.exe` and underscores without collapsing.
//! Their divergence is pinned by tests below.

use worktracker_domain::Category;

const IDE_KEYWORDS: &[&str] = &["code", "idea", "intellij", "visual studio", "eclipse", "pycharm"];
const COMMUNICATION_KEYWORDS: &[&str] = &["zoom", "teams", "slack", "discord"];
const BROWSER_KEYWORDS: &[&str] = &["chrome", "firefox", "edge", "browser"];
const TERMINAL_KEYWORDS: &[&str] = &["terminal", "cmd", "powershell", "bash", "windowsterminal"];
const GAME_KEYWORDS: &[&str] = &["minecraft", "steam", "game"];
const MEDIA_KEYWORDS: &[&str] = &["spotify", "vlc", "music"];

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Categorize one activity sample.
///
/// Both inputs must already be lowercase; absent values are passed as empty
/// strings. Every input maps to exactly one [`Category`].
#[must_use]
pub fn categorize(app: &str, title: &str) -> Category {
    if contains_any(app, IDE_KEYWORDS) {
        return Category::Programming;
    }
    if contains_any(app, COMMUNICATION_KEYWORDS) || title.contains("meeting") {
        return Category::Communication;
    }
    if contains_any(app, BROWSER_KEYWORDS) {
        if title.contains("github") || title.contains("stackoverflow") || title.contains("documentation") {
            return Category::Programming;
        }
        if title.contains("youtube") || title.contains("netflix") || title.contains("twitch") {
            return Category::Entertainment;
        }
        if title.contains("mail") || title.contains("gmail") || title.contains("outlook") {
            return Category::Email;
        }
        return Category::Browsing;
    }
    if contains_any(app, TERMINAL_KEYWORDS) {
        return Category::Programming;
    }
    if app.contains("explorer") {
        return Category::FileManagement;
    }
    if contains_any(app, GAME_KEYWORDS) {
        return Category::Games;
    }
    if contains_any(app, MEDIA_KEYWORDS) {
        return Category::Media;
    }
    Category::Other
}

/// Dashboard normalizer: collapse raw process/window names into canonical
/// display names.
///
/// Unmatched names pass through with trailing `.exe`/`.EXE` stripped;
/// null/empty input becomes "Unknown".
#[must_use]
pub fn normalize_app_name(app_name: Option<&str>) -> String {
    let Some(raw) = app_name.filter(|name| !name.is_empty()) else {
        return "Unknown".to_string();
    };
    let lower = raw.to_lowercase();

    if lower.contains("code") {
        return "VS Code".to_string();
    }
    if lower.contains("idea") || lower.contains("intellij") {
        return "IntelliJ IDEA".to_string();
    }
    if lower.contains("chrome") {
        return "Chrome".to_string();
    }
    if lower.contains("firefox") {
        return "Firefox".to_string();
    }
    if lower.contains("edge") {
        return "Edge".to_string();
    }
    if lower.contains("terminal") || lower.contains("powershell") || lower.contains("cmd") {
        return "Terminal".to_string();
    }
    if lower.contains("explorer") {
        return "File Explorer".to_string();
    }
    if lower.contains("zoom") {
        return "Zoom".to_string();
    }
    if lower.contains("teams") {
        return "Teams".to_string();
    }
    if lower.contains("slack") {
        return "Slack".to_string();
    }
    if lower.contains("discord") {
        return "Discord".to_string();
    }
    if lower.contains("spotify") {
        return "Spotify".to_string();
    }
    raw.replace(".exe", "").replace(".EXE", "")
}

/// Session-tracking normalizer: strip `.exe`, turn underscores into spaces,
/// trim. Does not collapse application families.
#[must_use]
pub fn normalize_process_name(app_name: Option<&str>) -> String {
    let Some(raw) = app_name.filter(|name| !name.is_empty()) else {
        return "Unknown".to_string();
    };
    raw.replace(".exe", "").replace('_', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ide_rule_wins_over_everything() {
        assert_eq!(categorize("code.exe", ""), Category::Programming);
        assert_eq!(categorize("pycharm64", "youtube"), Category::Programming);
        assert_eq!(categorize("visual studio", "meeting notes"), Category::Programming);
    }

    #[test]
    fn meeting_title_beats_browser_keyword() {
        // Communication-or-title is checked before the browser rule; this
        // precedence is part of the contract.
        assert_eq!(categorize("chrome.exe", "weekly meeting - google meet"), Category::Communication);
        assert_eq!(categorize("slack.exe", ""), Category::Communication);
    }

    #[test]
    fn browser_title_subrules() {
        assert_eq!(categorize("chrome.exe", "my repo - github"), Category::Programming);
        assert_eq!(categorize("firefox", "rust - stackoverflow"), Category::Programming);
        assert_eq!(categorize("edge", "youtube - cat videos"), Category::Entertainment);
        assert_eq!(categorize("chrome", "inbox - gmail"), Category::Email);
        assert_eq!(categorize("browser", "some article"), Category::Browsing);
    }

    #[test]
    fn remaining_rules_in_order() {
        assert_eq!(categorize("windowsterminal", ""), Category::Programming);
        assert_eq!(categorize("explorer.exe", ""), Category::FileManagement);
        assert_eq!(categorize("steam", ""), Category::Games);
        assert_eq!(categorize("spotify.exe", ""), Category::Media);
        assert_eq!(categorize("notepad", ""), Category::Other);
    }

    #[test]
    fn empty_inputs_are_other() {
        assert_eq!(categorize("", ""), Category::Other);
    }

    #[test]
    fn categorize_is_pure() {
        for _ in 0..3 {
            assert_eq!(categorize("chrome", "github"), Category::Programming);
        }
    }

    #[test]
    fn dashboard_normalizer_collapses_families() {
        assert_eq!(normalize_app_name(Some("Code.exe")), "VS Code");
        assert_eq!(normalize_app_name(Some("idea64.exe")), "IntelliJ IDEA");
        assert_eq!(normalize_app_name(Some("chrome.exe")), "Chrome");
        assert_eq!(normalize_app_name(Some("WindowsTerminal.exe")), "Terminal");
        assert_eq!(normalize_app_name(Some("explorer.exe")), "File Explorer");
        assert_eq!(normalize_app_name(None), "Unknown");
        assert_eq!(normalize_app_name(Some("")), "Unknown");
    }

    #[test]
    fn dashboard_normalizer_strips_exe_on_passthrough() {
        assert_eq!(normalize_app_name(Some("notepad.exe")), "notepad");
        assert_eq!(normalize_app_name(Some("GIMP.EXE")), "GIMP");
    }

    #[test]
    fn session_normalizer_strips_exe_and_underscores() {
        assert_eq!(normalize_process_name(Some("my_app.exe")), "my app");
        assert_eq!(normalize_process_name(Some("Code.exe")), "Code");
        assert_eq!(normalize_process_name(None), "Unknown");
    }

    #[test]
    fn normalizers_diverge_on_known_families() {
        // Deliberate call-site divergence: the dashboard variant collapses,
        // the session variant does not.
        let raw = Some("chrome.exe");
        assert_eq!(normalize_app_name(raw), "Chrome");
        assert_eq!(normalize_process_name(raw), "chrome");

        let underscored = Some("task_manager.exe");
        assert_eq!(normalize_app_name(underscored), "task_manager");
        assert_eq!(normalize_process_name(underscored), "task manager");
    }
}
