use serde::{Deserialize, Serialize};

/// Category assumed for results that arrive without one.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Where a history entry originally came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    App,
    Calculator,
    File,
    Krunner,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::App => "app",
            SourceType::Calculator => "calculator",
            SourceType::File => "file",
            SourceType::Krunner => "krunner",
        }
    }

    /// Lenient parse used when migrating stored entries; unknown tags yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "app" => Some(SourceType::App),
            "calculator" => Some(SourceType::Calculator),
            "file" => Some(SourceType::File),
            "krunner" => Some(SourceType::Krunner),
            _ => None,
        }
    }
}

/// A raw search result handed over by a launcher backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultItem {
    pub display: String,       // Label shown to the user
    pub category: String,      // Grouping used for priority and visibility
    pub decoration: String,    // Icon name/path
    pub match_id: String,      // Backend-stable identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ResultItem {
    pub fn new(display: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn with_match_id(mut self, match_id: impl Into<String>) -> Self {
        self.match_id = match_id.into();
        self
    }

    pub fn with_decoration(mut self, decoration: impl Into<String>) -> Self {
        self.decoration = decoration.into();
        self
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn category_or_other(&self) -> &str {
        if self.category.is_empty() {
            FALLBACK_CATEGORY
        } else {
            &self.category
        }
    }
}
