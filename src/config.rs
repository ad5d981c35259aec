//! Planner configuration (`shotlist.toml`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ShotlistError;
use crate::models::StoryFormat;
use crate::services::pacing::DEFAULT_WORDS_PER_SECOND;
use crate::services::validator::DEFAULT_DENSITY_THRESHOLD;

pub const CONFIG_ENV: &str = "SHOTLIST_CONFIG";
pub const LOCAL_CONFIG_FILE: &str = "shotlist.toml";

/// Tunables for a planning run. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotlistConfig {
    /// Root under which `<project_id>/shot_list.json` is written.
    pub output_dir: PathBuf,
    pub default_format: StoryFormat,
    pub words_per_second: f64,
    pub scene_density_threshold: usize,
    /// Replaces the built-in negative prompt when set.
    pub negative_prompt: Option<String>,
}

impl Default for ShotlistConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            default_format: StoryFormat::default(),
            words_per_second: DEFAULT_WORDS_PER_SECOND,
            scene_density_threshold: DEFAULT_DENSITY_THRESHOLD,
            negative_prompt: None,
        }
    }
}

/// Find and load the config file.
///
/// Path priority: explicit path > SHOTLIST_CONFIG env > ./shotlist.toml >
/// ~/.shotlist/config.toml. Unreadable or malformed files fall back to
/// defaults with a warning.
pub fn load_config(explicit_path: Option<&Path>) -> ShotlistConfig {
    let candidate = explicit_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
        .or_else(|| {
            let local = Path::new(LOCAL_CONFIG_FILE);
            local.is_file().then(|| local.to_path_buf())
        })
        .or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".shotlist").join("config.toml"))
                .filter(|p| p.is_file())
        });

    match candidate {
        Some(path) => load_config_file(&path),
        None => ShotlistConfig::default(),
    }
}

/// Load one config file, falling back to defaults on any failure.
pub fn load_config_file(path: &Path) -> ShotlistConfig {
    match read_config_file(path) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("{} ({}). Using default.", e, path.display());
            ShotlistConfig::default()
        }
    }
}

/// Read and parse one config file.
pub fn read_config_file(path: &Path) -> Result<ShotlistConfig, ShotlistError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}
