// Engine settings, loaded from a JSON file and environment overrides
use crate::error::{EngineError, EngineResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "STOCK_INSIGHT_CONFIG";
pub const DATA_DIR_ENV: &str = "STOCK_INSIGHT_DATA_DIR";

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct EngineSettings {
    pub data: DataSettings,
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DataSettings {
    /// Directory scanned for `<SYMBOL>.csv` bar files.
    pub dir: PathBuf,
    /// Symbol assigned to a bar file whose name yields none.
    pub default_symbol: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Upper bound on snapshots computed at the same time.
    pub max_concurrency: usize,
    /// Number of trailing bars handed to the indicator engine.
    pub history_days: usize,
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            dir: PathBuf::from("data"),
            default_symbol: "UNKNOWN".to_string(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            max_concurrency: 4,
            history_days: 100,
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(raw: &str) -> EngineResult<Self> {
        let settings: EngineSettings = serde_json::from_str(raw)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read settings file '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    /// Reads the file named by `STOCK_INSIGHT_CONFIG` if set, falls back to
    /// defaults, then applies `STOCK_INSIGHT_DATA_DIR`.
    pub fn load() -> EngineResult<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn load_from(env: impl Fn(&str) -> Option<String>) -> EngineResult<Self> {
        let mut settings = match env(CONFIG_PATH_ENV) {
            Some(path) => {
                tracing::info!(path = %path, "Loading engine settings from file");
                Self::from_file(path)?
            }
            None => EngineSettings::default(),
        };
        if let Some(dir) = env(DATA_DIR_ENV) {
            settings.data.dir = PathBuf::from(dir);
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.analysis.max_concurrency == 0 {
            return Err(EngineError::ConfigError("analysis.max_concurrency must be greater than 0".to_string()));
        }
        if self.analysis.history_days == 0 {
            return Err(EngineError::ConfigError("analysis.history_days must be greater than 0".to_string()));
        }
        Ok(())
    }
}
