use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::viral::ViralWeights;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternsConfig {
    pub default_top_n: usize,
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self { default_top_n: 20 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    pub viral: ViralWeights,
    pub patterns: PatternsConfig,
}

impl EngineConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                EngineConfig::default()
            }
        } else {
            EngineConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(top_n) = env::var("ANALYTICS_TOP_N") {
            if let Ok(value) = top_n.parse::<usize>() {
                if value > 0 {
                    self.patterns.default_top_n = value;
                }
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ANALYTICS_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/analytics.toml")))
}
