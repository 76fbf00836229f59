//! Maps web results to high quality theme icons instead of low-res favicons.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

pub const FALLBACK_WEB_ICON: &str = "internet-web-browser";
const DEFAULT_ICON: &str = "application-x-executable";

const WEB_CATEGORIES: &[&str] = &[
    "Web",
    "Web Search",
    "Bookmarks",
    "Browser",
    "Web Bookmarks",
    "Yer İmleri",
];

// Domain -> freedesktop/Papirus icon name. Bare domains only; `www.` and
// subdomains are resolved by `icon_for_url`.
const KNOWN_SITES: &[(&str, &str)] = &[
    ("google.com", "google"),
    ("duckduckgo.com", "duckduckgo"),
    ("bing.com", "web-browser"),
    ("yahoo.com", "web-browser"),
    ("facebook.com", "facebook"),
    ("twitter.com", "twitter"),
    ("x.com", "twitter"),
    ("instagram.com", "instagram"),
    ("linkedin.com", "linkedin"),
    ("reddit.com", "reddit"),
    ("discord.com", "discord"),
    ("telegram.org", "telegram"),
    ("whatsapp.com", "whatsapp"),
    ("youtube.com", "youtube"),
    ("youtu.be", "youtube"),
    ("netflix.com", "netflix"),
    ("twitch.tv", "twitch"),
    ("spotify.com", "spotify"),
    ("soundcloud.com", "soundcloud"),
    ("github.com", "github"),
    ("gitlab.com", "gitlab"),
    ("stackoverflow.com", "stackoverflow"),
    ("bitbucket.org", "bitbucket"),
    ("npmjs.com", "npm"),
    ("wikipedia.org", "wikipedia"),
    ("gmail.com", "gmail"),
    ("mail.google.com", "gmail"),
    ("outlook.com", "ms-outlook"),
    ("outlook.live.com", "ms-outlook"),
    ("drive.google.com", "google-drive"),
    ("dropbox.com", "dropbox"),
    ("onedrive.com", "onedrive"),
    ("onedrive.live.com", "onedrive"),
    ("amazon.com", "amazon"),
    ("amazon.de", "amazon"),
    ("amazon.co.uk", "amazon"),
    ("ebay.com", "web-browser"),
    ("kde.org", "kde"),
    ("store.kde.org", "kde"),
    ("archlinux.org", "archlinux"),
    ("aur.archlinux.org", "archlinux"),
    ("ubuntu.com", "ubuntu"),
    ("fedoraproject.org", "fedora"),
    ("bbc.com", FALLBACK_WEB_ICON),
    ("cnn.com", FALLBACK_WEB_ICON),
];

fn known_site(domain: &str) -> Option<&'static str> {
    KNOWN_SITES
        .iter()
        .find(|(site, _)| *site == domain)
        .map(|(_, icon)| *icon)
}

fn scheme_regex() -> Option<&'static Regex> {
    static SCHEME: OnceLock<Option<Regex>> = OnceLock::new();
    SCHEME
        .get_or_init(|| Regex::new(r"^(?i)(https?:)?//").ok())
        .as_ref()
}

/// Host part of a URL, lowercased, without scheme, path or port.
pub fn extract_domain(url: &str) -> String {
    let url = url.trim();
    let rest = match scheme_regex() {
        Some(re) => re.replace(url, ""),
        None => Cow::Borrowed(url),
    };
    let host = rest.split('/').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.to_lowercase()
}

pub fn is_valid_decoration(decoration: &str) -> bool {
    !decoration.is_empty() && decoration != "QIcon()"
}

/// Theme icon for a result. Only web URLs and web categories are remapped;
/// anything else keeps its own decoration.
pub fn icon_for_url(url: &str, original: &str, category: &str) -> String {
    let is_web_url = url.starts_with("http://") || url.starts_with("https://");
    let is_web_category = WEB_CATEGORIES.contains(&category);

    if !is_web_url && !is_web_category {
        return if original.is_empty() { DEFAULT_ICON } else { original }.to_string();
    }

    let domain = extract_domain(url);
    if domain.is_empty() {
        return if original.is_empty() { FALLBACK_WEB_ICON } else { original }.to_string();
    }

    let bare = domain.strip_prefix("www.").unwrap_or(&domain);
    let labels: Vec<&str> = bare.split('.').collect();
    let base = (labels.len() > 2).then(|| labels[labels.len() - 2..].join("."));

    if let Some(icon) = known_site(bare).or_else(|| base.as_deref().and_then(known_site)) {
        return icon.to_string();
    }

    if is_valid_decoration(original) {
        original.to_string()
    } else {
        FALLBACK_WEB_ICON.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain() {
        assert_eq!(extract_domain("https://www.GitHub.com/rust-lang"), "www.github.com");
        assert_eq!(extract_domain("//localhost:8080/x"), "localhost");
        assert_eq!(extract_domain("kde.org"), "kde.org");
        assert_eq!(extract_domain(""), "");
    }

    #[test]
    fn test_icon_for_known_sites() {
        assert_eq!(icon_for_url("https://www.youtube.com/watch", "", "Web"), "youtube");
        assert_eq!(icon_for_url("https://en.wikipedia.org/wiki/Rust", "", ""), "wikipedia");
        assert_eq!(icon_for_url("https://mail.google.com/", "", ""), "gmail");
        assert_eq!(icon_for_url("http://aur.archlinux.org/pkg", "", ""), "archlinux");
    }

    #[test]
    fn test_icon_for_unknown_site_falls_back() {
        assert_eq!(icon_for_url("https://example.com", "favicon-x", ""), "favicon-x");
        assert_eq!(icon_for_url("https://example.com", "QIcon()", ""), FALLBACK_WEB_ICON);
        assert_eq!(icon_for_url("", "", "Bookmarks"), FALLBACK_WEB_ICON);
    }

    #[test]
    fn test_non_web_results_keep_their_icon() {
        assert_eq!(icon_for_url("/home/u/a.txt", "text-plain", "Files"), "text-plain");
        assert_eq!(icon_for_url("", "", "Applications"), "application-x-executable");
    }

    #[test]
    fn test_is_valid_decoration() {
        assert!(is_valid_decoration("image://icon/kate"));
        assert!(!is_valid_decoration(""));
        assert!(!is_valid_decoration("QIcon()"));
    }
}
