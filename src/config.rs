// File: src/config.rs
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const URL_ENV: &str = "LEARNSHELF_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub url: String,
    pub allow_insecure_certs: bool,
    pub search_debounce_ms: u64,
    pub dashboard_sample_size: usize,
    pub items_per_page: usize,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "http://localhost:5000".to_string(),
            allow_insecure_certs: false,
            search_debounce_ms: 300,
            dashboard_sample_size: 6,
            items_per_page: 12,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("org", "learnshelf", "learnshelf")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Missing file means defaults. The URL can always be overridden from
    /// the environment.
    pub fn load() -> Result<Self> {
        let mut config = match Self::path() {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Self::from_toml(&raw).with_context(|| format!("parsing {}", path.display()))?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(URL_ENV)
            && !url.trim().is_empty()
        {
            config.url = url.trim().to_string();
        }
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("invalid config")
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("no config directory on this platform")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml("url = \"https://learn.example.org\"\n").unwrap();
        assert_eq!(config.url, "https://learn.example.org");
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.dashboard_sample_size, 6);
        assert_eq!(config.items_per_page, 12);
        assert!(!config.allow_insecure_certs);
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(Config::from_toml("dashboard_sample_size = \"six\"").is_err());
    }

    #[test]
    fn saved_file_loads_back() {
        let dir = std::env::temp_dir().join(format!("learnshelf-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let config = Config {
            url: "https://learn.example.org".into(),
            items_per_page: 24,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::from_toml(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, config);
        fs::remove_dir_all(&dir).unwrap();
    }
}
