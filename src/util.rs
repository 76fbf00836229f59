//! Small pure helpers shared by the stores and the ranking code.

use crate::model::SourceType;
use std::time::{SystemTime, UNIX_EPOCH};

/// Marker found in freedesktop application ids and paths.
const DESKTOP_ENTRY_MARKER: &str = ".desktop";

/// Category names (lowercased) that always denote launchable applications.
const APPLICATION_CATEGORIES: &[&str] = &[
    "uygulamalar",
    "applications",
    "apps",
    "sistem ayarları",
    "system settings",
];

pub fn generate_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub fn detect_source_type(category: &str, is_app: bool, file_path: &str) -> SourceType {
    if is_app {
        SourceType::App
    } else if category.contains("Calculate") || category.contains("Hesapla") {
        SourceType::Calculator
    } else if !file_path.is_empty() {
        SourceType::File
    } else {
        SourceType::Krunner
    }
}

pub fn looks_like_application(category: &str, file_path: &str, match_id: &str) -> bool {
    let lowered = category.to_lowercase();
    APPLICATION_CATEGORIES.contains(&lowered.as_str())
        || file_path.contains(DESKTOP_ENTRY_MARKER)
        || match_id.contains(DESKTOP_ENTRY_MARKER)
}

/// Returns the match id as a launchable path when an application was stored
/// without one but its id carries a desktop-entry path or URI.
pub fn repair_app_path(is_app: bool, file_path: &str, match_id: &str) -> Option<String> {
    if !is_app || !(file_path.is_empty() || file_path == "applications") {
        return None;
    }
    if !match_id.contains(DESKTOP_ENTRY_MARKER) {
        return None;
    }
    let path_like = match_id.contains('/')
        || match_id.starts_with("applications:")
        || match_id.starts_with("file://");
    path_like.then(|| match_id.to_string())
}

/// Calculator, unit and currency results float above everything else.
pub fn is_primary_category(category: &str) -> bool {
    ["Calculate", "Hesapla", "Unit", "Birim", "Currency", "Döviz"]
        .iter()
        .any(|needle| category.contains(needle))
}

pub fn is_file_category(category: &str) -> bool {
    ["Dosya", "Klasör", "File", "Folder", "Document", "Belge"]
        .iter()
        .any(|needle| category.contains(needle))
}

fn strip_file_scheme(path: &str) -> &str {
    path.strip_prefix("file://").unwrap_or(path)
}

pub fn parent_folder(file_path: &str) -> String {
    let path = strip_file_scheme(file_path);
    match path.rfind('/') {
        Some(idx) if idx > 0 => path[..idx].to_string(),
        _ => String::new(),
    }
}

/// Name of the directory containing the file, without its own parents.
pub fn short_parent_name(file_path: &str) -> String {
    let parent = parent_folder(file_path);
    match parent.rfind('/') {
        Some(idx) => parent[idx + 1..].to_string(),
        None => parent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_uuid_is_unique_v4() {
        let a = generate_uuid();
        let b = generate_uuid();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
        assert_eq!(a.chars().nth(14), Some('4'));
    }

    #[test]
    fn test_detect_source_type() {
        assert_eq!(detect_source_type("Anything", true, ""), SourceType::App);
        assert_eq!(detect_source_type("Calculator", false, ""), SourceType::Krunner);
        assert_eq!(detect_source_type("Calculate", false, "/x"), SourceType::Calculator);
        assert_eq!(detect_source_type("Hesaplama", false, ""), SourceType::Calculator);
        assert_eq!(detect_source_type("Files", false, "/tmp/a"), SourceType::File);
        assert_eq!(detect_source_type("Web", false, ""), SourceType::Krunner);
    }

    #[test]
    fn test_looks_like_application() {
        assert!(looks_like_application("Applications", "", ""));
        assert!(looks_like_application("SYSTEM SETTINGS", "", ""));
        assert!(looks_like_application("Other", "", "org.kde.kate.desktop"));
        assert!(looks_like_application("", "/usr/share/applications/kate.desktop", ""));
        assert!(!looks_like_application("Files", "/home/u/a.txt", "a.txt"));
    }

    #[test]
    fn test_repair_app_path() {
        assert_eq!(
            repair_app_path(true, "", "applications:org.kde.kate.desktop"),
            Some("applications:org.kde.kate.desktop".to_string())
        );
        assert_eq!(
            repair_app_path(true, "applications", "/usr/share/applications/kate.desktop"),
            Some("/usr/share/applications/kate.desktop".to_string())
        );
        assert_eq!(repair_app_path(true, "", "org.kde.kate.desktop"), None);
        assert_eq!(repair_app_path(true, "/opt/kate", "file:///a.desktop"), None);
        assert_eq!(repair_app_path(false, "", "file:///a.desktop"), None);
    }

    #[test]
    fn test_category_classifiers() {
        assert!(is_primary_category("Unit Conversion"));
        assert!(is_primary_category("Döviz"));
        assert!(!is_primary_category("Files"));
        assert!(is_file_category("Klasörler"));
        assert!(is_file_category("Documents"));
        assert!(!is_file_category("Applications"));
    }

    #[test]
    fn test_parent_helpers() {
        assert_eq!(parent_folder("file:///home/u/docs/a.txt"), "/home/u/docs");
        assert_eq!(short_parent_name("file:///home/u/docs/a.txt"), "docs");
        assert_eq!(short_parent_name("/a.txt"), "");
        assert_eq!(parent_folder("a.txt"), "");
        assert_eq!(short_parent_name("rel/a.txt"), "rel");
    }
}
