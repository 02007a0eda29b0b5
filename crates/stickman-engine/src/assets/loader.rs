use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use crate::assets::level_file::LevelFile;
use crate::core::level::Level;

/// Exit status for a missing or unreadable level or config.
pub const EXIT_MISSING: i32 = 10;
/// Exit status for a malformed level or config.
pub const EXIT_MALFORMED: i32 = 11;

/// Errors from loading levels or the session config.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("level source not found: {0}")]
    Missing(String),

    #[error("failed to read {source_id}")]
    Io {
        source_id: String,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to parse {source_id}")]
    Parse {
        source_id: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("invalid level {source_id}: {reason}")]
    Invalid { source_id: String, reason: String },

    #[error("session config lists no levels")]
    NoLevels,
}

impl LoadError {
    /// Process exit status for a failure at startup.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::Missing(_) | LoadError::Io { .. } => EXIT_MISSING,
            LoadError::Parse { .. } | LoadError::Invalid { .. } | LoadError::NoLevels => EXIT_MALFORMED,
        }
    }
}

/// Factory for fully wired levels, keyed by level source identifier.
pub trait LevelLoader {
    fn load(&self, source: &str) -> Result<Level, LoadError>;
}

/// In-memory level definitions. Used when levels arrive as strings,
/// e.g. from the browser.
#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    levels: HashMap<String, LevelFile>,
}

impl LevelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, level: LevelFile) {
        self.levels.insert(source.into(), level);
    }

    /// Parse and register a level definition.
    pub fn insert_json(&mut self, source: impl Into<String>, json: &str) -> Result<(), LoadError> {
        let source = source.into();
        let level = LevelFile::from_json(json).map_err(|error| LoadError::Parse {
            source_id: source.clone(),
            error,
        })?;
        self.insert(source, level);
        Ok(())
    }

    /// Parse a JSON object mapping source identifiers to level definitions.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let levels: HashMap<String, LevelFile> =
            serde_json::from_str(json).map_err(|error| LoadError::Parse {
                source_id: "level catalog".to_string(),
                error,
            })?;
        Ok(Self { levels })
    }

    pub fn contains(&self, source: &str) -> bool {
        self.levels.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelLoader for LevelCatalog {
    fn load(&self, source: &str) -> Result<Level, LoadError> {
        let file = self
            .levels
            .get(source)
            .ok_or_else(|| LoadError::Missing(source.to_string()))?;
        file.build(source)
    }
}

/// Reads level files from disk, relative to a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LevelLoader for DirectoryLoader {
    fn load(&self, source: &str) -> Result<Level, LoadError> {
        let path = self.root.join(source);
        let json = std::fs::read_to_string(&path).map_err(|error| {
            if error.kind() == std::io::ErrorKind::NotFound {
                LoadError::Missing(source.to_string())
            } else {
                LoadError::Io {
                    source_id: source.to_string(),
                    error,
                }
            }
        })?;
        let file = LevelFile::from_json(&json).map_err(|error| LoadError::Parse {
            source_id: source.to_string(),
            error,
        })?;
        log::info!("loaded {} from {}", source, path.display());
        file.build(source)
    }
}
