//! The only place persisted state touches the filesystem. Stores hand over
//! and receive plain JSON strings; this module maps them to files.

use crate::config::{Config, project_dirs};
use crate::error::{StorageError, StorageResult};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFile {
    CategorySettings,
    History,
    Pinned,
    Stats,
}

impl StateFile {
    pub fn file_name(self) -> &'static str {
        match self {
            StateFile::CategorySettings => "categories.json",
            StateFile::History => "history.json",
            StateFile::Pinned => "pinned.json",
            StateFile::Stats => "stats.json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Configured `state_dir`, else the platform data directory.
    pub fn from_config(config: &Config) -> StorageResult<Self> {
        if let Some(dir) = &config.storage.state_dir {
            return Ok(Self::new(dir));
        }
        project_dirs()
            .map(|dirs| Self::new(dirs.data_dir()))
            .ok_or(StorageError::NoStateDir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, file: StateFile) -> PathBuf {
        self.root.join(file.file_name())
    }

    /// Stored string, or empty when nothing was saved yet.
    pub fn read(&self, file: StateFile) -> StorageResult<String> {
        let path = self.path(file);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    pub fn write(&self, file: StateFile, content: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.root).map_err(|source| StorageError::Io {
            path: self.root.clone(),
            source,
        })?;
        let path = self.path(file);
        debug!("Writing {} bytes to {:?}", content.len(), path);
        fs::write(&path, content).map_err(|source| StorageError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = StateDir::new(dir.path());
        assert_eq!(state.read(StateFile::History).unwrap(), "");
    }

    #[test]
    fn test_write_creates_dir_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let state = StateDir::new(dir.path().join("nested"));
        state.write(StateFile::Pinned, "[]").unwrap();
        assert_eq!(state.read(StateFile::Pinned).unwrap(), "[]");
        assert!(state.path(StateFile::Pinned).ends_with("pinned.json"));
    }

    #[test]
    fn test_from_config_prefers_override() {
        let mut config = Config::default();
        config.storage.state_dir = Some(PathBuf::from("/tmp/searchrank-test"));
        let state = StateDir::from_config(&config).unwrap();
        assert_eq!(state.root(), Path::new("/tmp/searchrank-test"));
    }
}
