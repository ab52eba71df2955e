use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{Distance, SportType};
use crate::pace::codec::ONE_MILE;

fn default_pace() -> String {
    "04:30".to_string()
}
fn default_distances() -> Vec<Distance> {
    Distance::defaults()
}
fn default_min_distance() -> f64 {
    ONE_MILE
}
fn default_sport_types() -> Vec<SportType> {
    SportType::runs()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaceConfig {
    /// Saved pace, typed per kilometre
    #[serde(default = "default_pace")]
    pub initial: String,
    #[serde(default = "default_distances")]
    pub distances: Vec<Distance>,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            initial: default_pace(),
            distances: default_distances(),
        }
    }
}

/// Which activities keep a streak alive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Activities must be strictly longer than this, in metres
    #[serde(default = "default_min_distance")]
    pub min_distance_m: f64,
    #[serde(default = "default_sport_types")]
    pub sport_types: Vec<SportType>,
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            min_distance_m: default_min_distance(),
            sport_types: default_sport_types(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub pace: PaceConfig,
    #[serde(default)]
    pub streak: StreakConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "stride")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("stride.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let mut config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        config.sanitize();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// A hand-edited distance list that doesn't hold up is replaced wholesale.
    fn sanitize(&mut self) {
        if let Some(err) = self
            .pace
            .distances
            .iter()
            .find_map(|d| d.validate().err())
        {
            warn!("Ignoring configured distances ({}); using defaults", err);
            self.pace.distances = default_distances();
        }
    }
}
