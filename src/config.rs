use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::extract::{ExtractOptions, PlateMode};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) session: Option<String>,
    #[serde(default)]
    pub(crate) store: Option<PathBuf>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    /// Groups shown by `top`
    #[serde(default)]
    pub(crate) top: Option<usize>,
    #[serde(default)]
    pub(crate) max_empty_rows: Option<usize>,
    #[serde(default)]
    pub(crate) row_cap: Option<usize>,
    #[serde(default)]
    pub(crate) plate_mode: Option<PlateMode>,
    #[serde(default)]
    pub(crate) all_sheets: bool,
}

impl Config {
    pub(crate) fn load() -> Self {
        Self::load_internal(false)
    }

    pub(crate) fn load_quiet() -> Self {
        Self::load_internal(true)
    }

    fn load_internal(quiet: bool) -> Self {
        // Try config locations in order of priority
        let config_paths = Self::get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        if !quiet {
                            eprintln!("Loaded config from {}", path.display());
                        }
                        return config;
                    }
                    Err(e) => {
                        if !quiet {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/tripstats/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("tripstats").join("config.toml"));
        }

        // 2. macOS Application Support: ~/Library/Application Support/tripstats/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let macos_path = config_dir.join("tripstats").join("config.toml");
            if !paths.contains(&macos_path) {
                paths.push(macos_path);
            }
        }

        // 3. Home directory: ~/.tripstats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".tripstats.toml"));
        }

        paths
    }

    /// Extraction settings from config, defaults for anything unset
    pub(crate) fn extract_options(&self) -> ExtractOptions {
        let defaults = ExtractOptions::default();
        ExtractOptions {
            max_empty_rows: self.max_empty_rows.unwrap_or(defaults.max_empty_rows).max(1),
            row_cap: self.row_cap.unwrap_or(defaults.row_cap),
            plate_mode: self.plate_mode.unwrap_or(defaults.plate_mode),
            all_sheets: self.all_sheets,
        }
    }
}
