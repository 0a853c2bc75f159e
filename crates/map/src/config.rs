use crate::error::{MapError, Result};
use context_graph::RankingConfig;
use context_render::ContextConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Per-repository configuration file, looked up at the repository root
pub const CONFIG_FILE_NAME: &str = ".context-map.toml";

/// Configuration for map generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Model whose tokenizer reports the map size
    pub model: String,

    /// Output lines are cut to this many characters
    pub max_line_chars: usize,

    /// Directory of `tree-sitter-<lang>-tags.scm` files overriding the
    /// bundled queries
    pub queries_dir: Option<PathBuf>,

    pub ranking: RankingConfig,

    pub context: ContextConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_line_chars: 150,
            queries_dir: None,
            ranking: RankingConfig::default(),
            context: ContextConfig::default(),
        }
    }
}

impl MapConfig {
    /// Parse a TOML configuration file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| MapError::invalid_config(format!("{}: {}", path.display(), e)))
    }

    /// `<root>/.context-map.toml` when present, defaults otherwise
    pub fn for_root(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            log::debug!("Loading configuration from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.max_line_chars == 0 {
            return Err("max_line_chars must be > 0".to_string());
        }
        self.ranking.validate()?;
        self.context.validate()?;
        Ok(())
    }
}
