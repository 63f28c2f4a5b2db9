use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_HIT_RADIUS_KM, DEFAULT_LOG_FILTER, DEFAULT_TOP_QUAKES,
};
use crate::utils::{get_app_data_dir, get_exe_dir};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub scene_file: Option<String>,
    pub top_quakes: usize,
    pub hit_radius_km: f64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene_file: None,
            top_quakes: DEFAULT_TOP_QUAKES,
            hit_radius_km: DEFAULT_HIT_RADIUS_KM,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    /// Loads `quakemap.ini` from the first location that has one; defaults otherwise.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Settings::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut config_map = HashMap::new();

        for line in reader.lines() {
            let line = line.context("Failed to read line from config")?;
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Ok(Self::from_map(&config_map))
    }

    fn from_map(config_map: &HashMap<String, String>) -> Self {
        let mut settings = Settings::default();

        if let Some(scene_file) = config_map.get("scene_file") {
            let scene_file = scene_file.trim_matches('"');
            if !scene_file.is_empty() {
                settings.scene_file = Some(scene_file.to_string());
            }
        }
        if let Some(top_str) = config_map.get("top_quakes") {
            if let Ok(top) = top_str.parse::<usize>() {
                settings.top_quakes = top;
            }
        }
        if let Some(radius_str) = config_map.get("hit_radius_km") {
            if let Ok(radius) = radius_str.parse::<f64>() {
                if radius.is_finite() && radius >= 0.0 {
                    settings.hit_radius_km = radius;
                }
            }
        }
        if let Some(filter) = config_map.get("log_filter") {
            let filter = filter.trim_matches('"');
            if !filter.is_empty() {
                settings.log_filter = filter.to_string();
            }
        }

        settings
    }

    /// Next to the executable first, then the per-user config directory.
    pub fn config_path() -> Option<PathBuf> {
        [get_exe_dir(), get_app_data_dir()]
            .into_iter()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.exists())
    }
}
