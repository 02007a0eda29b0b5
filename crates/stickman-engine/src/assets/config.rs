use serde::{Deserialize, Serialize};
use crate::core::level::LevelRules;

/// Directory prefix every level file name is resolved under.
pub const LEVEL_DIR: &str = "levels";

/// Session configuration: which levels to play, in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Level file names, relative to the levels directory.
    pub level_files: Vec<String>,
    /// Scoring rules applied to every level.
    #[serde(default)]
    pub rules: LevelRules,
}

impl SessionConfig {
    /// Parse a session config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Source identifiers of the configured levels, e.g. `levels/level1.json`.
    pub fn level_sources(&self) -> Vec<String> {
        self.level_files
            .iter()
            .map(|name| format!("{LEVEL_DIR}/{name}"))
            .collect()
    }
}
