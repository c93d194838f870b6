//! Run configuration: sheet credentials, source tabs and column layout
//!
//! Loaded from `~/.pltrack/config.json` when present, otherwise the stock
//! tab layout is used. `PLTRACK_SHEET_ID` and `PLTRACK_API_KEY` override
//! the file.

use crate::services::extractor::ColumnRules;
use crate::types::{PltrackError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const SHEET_ID_ENV: &str = "PLTRACK_SHEET_ID";
pub const API_KEY_ENV: &str = "PLTRACK_API_KEY";

const STOCK_SOURCES: [&str; 8] = [
    "S1x",
    "S2x",
    "S3PM",
    "S3IR",
    "follow",
    "Tennis",
    "MLB",
    "American Football",
];

const STOCK_SUBSET: [&str; 4] = ["follow", "Tennis", "MLB", "American Football"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sheet_id: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Tabs to aggregate, in table column order
    #[serde(default = "stock_sources")]
    pub sources: Vec<String>,
    /// Tabs shown in the subset views; each must also be in `sources`
    #[serde(default = "stock_subset")]
    pub subset: Vec<String>,
    #[serde(default)]
    pub column_rules: ColumnRules,
}

fn stock_sources() -> Vec<String> {
    STOCK_SOURCES.iter().map(|s| s.to_string()).collect()
}

fn stock_subset() -> Vec<String> {
    STOCK_SUBSET.iter().map(|s| s.to_string()).collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sheet_id: None,
            api_key: None,
            sources: stock_sources(),
            subset: stock_subset(),
            column_rules: ColumnRules::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path` (or the default location), apply environment
    /// overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path().ok().filter(|p| p.exists()),
        };

        let mut config = match path {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Default config path (~/.pltrack/config.json)
    pub fn default_path() -> Result<PathBuf> {
        let home = directories::UserDirs::new()
            .ok_or_else(|| PltrackError::Config("Failed to get home directory".into()))?
            .home_dir()
            .to_path_buf();
        Ok(home.join(".pltrack").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PltrackError::Config(format!("{}: {}", path.display(), e)))
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(sheet_id) = lookup(SHEET_ID_ENV).filter(|v| !v.is_empty()) {
            self.sheet_id = Some(sheet_id);
        }
        if let Some(api_key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.api_key = Some(api_key);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(PltrackError::Config("no sources configured".into()));
        }
        for (field, list) in [("sources", &self.sources), ("subset", &self.subset)] {
            let mut seen = HashSet::new();
            if let Some(dup) = list.iter().find(|s| !seen.insert(s.as_str())) {
                return Err(PltrackError::Config(format!(
                    "{} lists {:?} more than once",
                    field, dup
                )));
            }
        }
        if let Some(stray) = self.subset.iter().find(|s| !self.sources.contains(s)) {
            return Err(PltrackError::Config(format!(
                "subset source {:?} is not in sources",
                stray
            )));
        }
        Ok(())
    }

    /// Sheet id and API key, both required for network retrieval
    pub fn credentials(&self) -> Result<(&str, &str)> {
        let sheet_id = self.sheet_id.as_deref().ok_or_else(|| {
            PltrackError::Config(format!("sheet id missing (set {})", SHEET_ID_ENV))
        })?;
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            PltrackError::Config(format!("api key missing (set {})", API_KEY_ENV))
        })?;
        Ok((sheet_id, api_key))
    }
}
