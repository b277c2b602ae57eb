use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use quadrant::dataset;
use quadrant::rings::{Extent, RingTable};
use quadrant::tool::Tool;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Dataset override; defaults to tools.toml next to the config file.
    pub dataset: Option<PathBuf>,
    pub extent: Extent,
    /// Ring edge radii as fractions of the available radius, innermost first.
    pub ring_radii: [f64; 4],
    pub dot_radius: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: None,
            extent: Extent::Bounded,
            ring_radii: [0.26, 0.47, 0.74, 1.0],
            dot_radius: 7.0,
        }
    }
}

impl Config {
    pub fn ring_table(&self) -> RingTable {
        RingTable::from_radii(self.ring_radii).unwrap_or_default()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Ring config error: {0}")]
    Ring(#[from] quadrant::rings::RingError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "toolradar", "toolradar").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("TOOLRADAR"))
        .build()?;

    let cfg: Config = s.try_deserialize()?;
    RingTable::from_radii(cfg.ring_radii)?;
    Ok(cfg)
}

pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
        && let Err(e) = write_default_files()
    {
        log::error!("Failed to write default config: {}", e);
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn dataset_path(cfg: &Config) -> Result<PathBuf, ConfigError> {
    if let Some(path) = &cfg.dataset {
        return Ok(path.clone());
    }
    let config_path = get_config_path()?;
    Ok(config_path.with_file_name("tools.toml"))
}

/// Loads the configured dataset, degrading to the built-in sample collection
/// so the widget always has something to draw.
pub fn load_tools(cfg: &Config) -> Vec<Tool> {
    let path = match dataset_path(cfg) {
        Ok(p) => p,
        Err(e) => {
            log::error!("No dataset path: {}", e);
            return builtin_tools();
        }
    };

    match dataset::load_dataset(&path) {
        Ok(tools) if !tools.is_empty() => tools,
        Ok(_) => {
            log::warn!("Dataset {} is empty, using built-in sample", path.display());
            builtin_tools()
        }
        Err(e) => {
            log::error!("Failed to load dataset {}: {}", path.display(), e);
            builtin_tools()
        }
    }
}

fn builtin_tools() -> Vec<Tool> {
    dataset::load_dataset_str(DEFAULT_DATASET).unwrap_or_else(|e| {
        log::error!("Built-in dataset failed to parse: {}", e);
        Vec::new()
    })
}

pub fn write_default_files() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    let dataset = path.with_file_name("tools.toml");
    if !dataset.exists() {
        fs_err::write(&dataset, DEFAULT_DATASET)?;
    }
    Ok(path)
}

pub fn snapshot_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "toolradar", "toolradar").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.data_local_dir().join("snapshot.png"))
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
const DEFAULT_DATASET: &str = include_str!("default_dataset.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>, dataset_path: PathBuf) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }
    if let Some(dataset_dir) = dataset_path.parent()
        && dataset_dir != config_dir.as_path()
        && let Err(e) = watcher.watch(dataset_dir, RecursiveMode::NonRecursive)
    {
        log::error!("Failed to watch dataset directory: {}", e);
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                if !meaningful_event {
                    continue;
                }

                let touches = |p: &Path| event.paths.iter().any(|q| q == p);
                let msg = if touches(&dataset_path) {
                    Some(AppEvent::DatasetReload)
                } else if touches(&config_path) {
                    Some(AppEvent::ConfigReload)
                } else {
                    None
                };

                if let Some(msg) = msg
                    && tx.send(msg).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_matches_defaults() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let cfg: Config = s.try_deserialize().unwrap();

        let defaults = Config::default();
        assert_eq!(cfg.extent, defaults.extent);
        assert_eq!(cfg.ring_radii, defaults.ring_radii);
        assert_eq!(cfg.dot_radius, defaults.dot_radius);
        assert_eq!(cfg.dataset, None);
    }

    #[test]
    fn test_builtin_dataset_parses_and_places() {
        let tools = builtin_tools();
        assert!(!tools.is_empty());
        assert!(tools.iter().all(|t| t.category.is_some()));
    }

    #[test]
    fn test_extent_deserialization() {
        let cases = vec![
            ("\"bounded\"", Extent::Bounded),
            ("\"Bounded\"", Extent::Bounded),
            ("\"open\"", Extent::Open),
            ("\"OPEN\"", Extent::Open),
        ];

        for (json, expected) in cases {
            let deserialized: Extent = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_bad_ring_radii_fall_back() {
        let cfg = Config {
            ring_radii: [0.9, 0.5, 0.7, 1.0],
            ..Config::default()
        };
        assert_eq!(cfg.ring_table(), RingTable::default());
    }
}
