use serde::Deserialize;
use std::path::PathBuf;
use directories::ProjectDirs;
use anyhow::{Context, Result};
use std::fs;

use crate::stores::pinned::GLOBAL_ACTIVITY;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    #[default]
    Minimal,
    Developer,
    PowerUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Debug,
    Preview,
    AdvancedSearch,
    Telemetry,
    CategoryPriority,
    ActivityPinning,
}

impl Profile {
    pub fn allows(self, feature: Feature) -> bool {
        use Profile::*;
        match feature {
            Feature::Debug | Feature::Telemetry => self == Developer,
            Feature::Preview | Feature::AdvancedSearch | Feature::CategoryPriority => {
                matches!(self, Developer | PowerUser)
            }
            Feature::ActivityPinning => self == PowerUser,
        }
    }

    pub fn defaults(self) -> DisplaySettings {
        match self {
            Profile::Minimal => DisplaySettings {
                display_mode: DisplayMode::Medium,
                view_mode: ViewMode::List,
                icon_size: 32,
                list_icon_size: 18,
                preview_enabled: false,
                debug_overlay: false,
            },
            Profile::Developer => DisplaySettings {
                display_mode: DisplayMode::Wide,
                view_mode: ViewMode::List,
                icon_size: 48,
                list_icon_size: 22,
                preview_enabled: true,
                debug_overlay: true,
            },
            Profile::PowerUser => DisplaySettings {
                display_mode: DisplayMode::ExtraWide,
                view_mode: ViewMode::Tile,
                icon_size: 64,
                list_icon_size: 24,
                preview_enabled: true,
                debug_overlay: false,
            },
        }
    }

    pub fn max_history_items(self) -> usize {
        match self {
            Profile::Minimal => 10,
            Profile::Developer => 50,
            Profile::PowerUser => 30,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub max_history_items: Option<usize>,
    #[serde(default = "default_activity")]
    pub activity: String,
}

fn default_activity() -> String { GLOBAL_ACTIVITY.to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            max_history_items: None,
            activity: default_activity(),
        }
    }
}

impl GeneralConfig {
    pub fn max_history_items(&self) -> usize {
        self.max_history_items
            .unwrap_or_else(|| self.profile.max_history_items())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Button,
    Medium,
    Wide,
    ExtraWide,
}

impl DisplayMode {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(DisplayMode::Button),
            1 => Some(DisplayMode::Medium),
            2 => Some(DisplayMode::Wide),
            3 => Some(DisplayMode::ExtraWide),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    List,
    Tile,
}

impl ViewMode {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(ViewMode::List),
            1 => Some(ViewMode::Tile),
            _ => None,
        }
    }
}

/// Raw `[display]` table. Every key is optional; see [`DisplayConfig::resolve`].
#[derive(Deserialize, Debug, Clone, Default)]
pub struct DisplayConfig {
    pub display_mode: Option<u32>,
    pub view_mode: Option<u32>,
    pub icon_size: Option<u32>,
    pub list_icon_size: Option<u32>,
    pub preview_enabled: Option<bool>,
    pub debug_overlay: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    pub display_mode: DisplayMode,
    pub view_mode: ViewMode,
    pub icon_size: u32,
    pub list_icon_size: u32,
    pub preview_enabled: bool,
    pub debug_overlay: bool,
}

const ICON_SIZE_RANGE: std::ops::RangeInclusive<u32> = 16..=128;
const LIST_ICON_SIZE_RANGE: std::ops::RangeInclusive<u32> = 12..=64;

impl DisplayConfig {
    /// Unset keys take the profile default; out-of-range keys are replaced
    /// by the fixed sane values.
    pub fn resolve(&self, profile: Profile) -> DisplaySettings {
        let defaults = profile.defaults();
        DisplaySettings {
            display_mode: self
                .display_mode
                .map_or(Some(defaults.display_mode), DisplayMode::from_index)
                .unwrap_or(DisplayMode::Medium),
            view_mode: self
                .view_mode
                .map_or(Some(defaults.view_mode), ViewMode::from_index)
                .unwrap_or(ViewMode::List),
            icon_size: match self.icon_size {
                None => defaults.icon_size,
                Some(size) if ICON_SIZE_RANGE.contains(&size) => size,
                Some(_) => 48,
            },
            list_icon_size: match self.list_icon_size {
                None => defaults.list_icon_size,
                Some(size) if LIST_ICON_SIZE_RANGE.contains(&size) => size,
                Some(_) => 22,
            },
            preview_enabled: self.preview_enabled.unwrap_or(defaults.preview_enabled),
            debug_overlay: self.debug_overlay.unwrap_or(defaults.debug_overlay),
        }
    }
}

pub fn recommended_icon_size(display_mode: DisplayMode, view_mode: ViewMode) -> u32 {
    match view_mode {
        ViewMode::List => 22,
        ViewMode::Tile => match display_mode {
            DisplayMode::Button => 32,
            DisplayMode::Medium => 48,
            DisplayMode::Wide => 56,
            DisplayMode::ExtraWide => 64,
        },
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "searchrank", "searchrank")
}

pub fn config_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

pub fn load_config_from(config_path: &std::path::Path) -> Result<Config> {
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("reading {}", config_path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("parsing {}", config_path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config_from(std::path::Path::new("/nonexistent/searchrank.toml")).unwrap();
        assert_eq!(config.general.profile, Profile::Minimal);
        assert_eq!(config.general.activity, "global");
        assert_eq!(config.general.max_history_items(), 10);
        assert!(config.storage.state_dir.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            [general]
            profile = "power-user"
            activity = "work"

            [display]
            icon_size = 500
            view_mode = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.general.profile, Profile::PowerUser);
        assert_eq!(config.general.max_history_items(), 30);

        let display = config.display.resolve(config.general.profile);
        assert_eq!(display.icon_size, 48);
        assert_eq!(display.view_mode, ViewMode::List);
        assert_eq!(display.display_mode, DisplayMode::ExtraWide);
        assert_eq!(display.list_icon_size, 24);
    }

    #[test]
    fn test_invalid_modes_fall_back() {
        let display = DisplayConfig {
            display_mode: Some(9),
            view_mode: Some(4),
            list_icon_size: Some(8),
            ..DisplayConfig::default()
        }
        .resolve(Profile::Developer);
        assert_eq!(display.display_mode, DisplayMode::Medium);
        assert_eq!(display.view_mode, ViewMode::List);
        assert_eq!(display.list_icon_size, 22);
        assert!(display.debug_overlay);
    }

    #[test]
    fn test_max_history_override() {
        let general = GeneralConfig {
            max_history_items: Some(3),
            ..GeneralConfig::default()
        };
        assert_eq!(general.max_history_items(), 3);
    }

    #[test]
    fn test_feature_gating() {
        assert!(Profile::Developer.allows(Feature::Telemetry));
        assert!(!Profile::PowerUser.allows(Feature::Telemetry));
        assert!(Profile::PowerUser.allows(Feature::ActivityPinning));
        assert!(Profile::PowerUser.allows(Feature::CategoryPriority));
        assert!(!Profile::Minimal.allows(Feature::Preview));
    }

    #[test]
    fn test_recommended_icon_size() {
        assert_eq!(recommended_icon_size(DisplayMode::Wide, ViewMode::Tile), 56);
        assert_eq!(recommended_icon_size(DisplayMode::Wide, ViewMode::List), 22);
    }
}
