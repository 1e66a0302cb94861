use crate::palette::Palettes;
use anyhow::Context;
use log::info;
use serde::Deserialize;
use std::{
    fs::File,
    path::{Path, PathBuf},
};

/// App configuration. Every field has a default, so the file is optional and
/// may override any subset of fields.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Open-Meteo geocoding search endpoint
    pub geocoding_url: String,
    /// Open-Meteo forecast endpoint
    pub forecast_url: String,
    /// Language requested for geocoding results
    pub language: String,
    /// Where theme and history are persisted
    pub settings_path: PathBuf,
    pub palettes: Palettes,
}

impl Config {
    const PATH: &'static str = "./config.json";

    /// Load config from the default path
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Self::PATH)
    }

    /// Load config from a JSON file. A missing file gives the default config,
    /// a malformed one is an error.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at `{}`, using defaults", path.display());
            return Ok(Self::default());
        }

        info!("Loading config from `{}`", path.display());
        let file = File::open(path).with_context(|| {
            format!("Error opening config file {}", path.display())
        })?;
        serde_json::from_reader(file).with_context(|| {
            format!("Error parsing config file {}", path.display())
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: "https://geocoding-api.open-meteo.com/v1/search"
                .into(),
            forecast_url: "https://api.open-meteo.com/v1/forecast".into(),
            language: "en".into(),
            settings_path: "./settings.json".into(),
            palettes: Palettes::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;
    use std::fs;

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("config.json")).unwrap();
        assert_eq!(config.language, "en");
        assert_eq!(config.settings_path, PathBuf::from("./settings.json"));
    }

    #[test]
    fn test_partial_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r##"{
                "language": "de",
                "settings_path": "/tmp/weather.json",
                "palettes": {
                    "dark": {
                        "text": "#ffffff",
                        "accent": "#ff0000",
                        "muted": "#808080",
                        "error": "#ff00ff"
                    }
                }
            }"##,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.language, "de");
        assert_eq!(config.settings_path, PathBuf::from("/tmp/weather.json"));
        assert_eq!(
            config.forecast_url,
            "https://api.open-meteo.com/v1/forecast"
        );
        assert_eq!(config.palettes.dark.accent, Color::from(0xff0000));
        // Untouched palette keeps its default
        assert_eq!(config.palettes.light, Palettes::default().light);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
