use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming a YAML configuration file.
pub const CONFIG_ENV: &str = "LANTERN_CONFIG";
/// Overrides `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";
/// Overrides `site.root`.
pub const ROOT_ENV: &str = "LANTERN_ROOT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// A read that stalls longer than this closes the connection
    pub read_timeout_secs: u64,
    /// Largest request head accepted before the blank line arrives
    pub max_request_bytes: usize,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            read_timeout_secs: 30,
            max_request_bytes: 8192,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub root: PathBuf,
    pub index: String,
    pub not_found_page: String,
    pub restricted_page: String,
    /// Root-relative folders that are never served
    pub restricted_folders: Vec<String>,
    pub supported_methods: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./www"),
            index: "index.html".to_string(),
            not_found_page: "not_found.html".to_string(),
            restricted_page: "restricted.html".to_string(),
            restricted_folders: Vec::new(),
            supported_methods: vec!["GET".to_string()],
        }
    }
}

impl Config {
    /// Loads the configuration: the YAML file named by `LANTERN_CONFIG` if
    /// set, otherwise defaults, then `LISTEN` / `LANTERN_ROOT` overrides.
    pub fn load() -> anyhow::Result<Self> {
        let cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file {path}"))?;
                Self::from_yaml_str(&raw).with_context(|| format!("Invalid config file {path}"))?
            }
            Err(_) => Self::default(),
        };

        Ok(cfg.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Applies overrides looked up by variable name.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup(LISTEN_ENV) {
            self.server.listen_addr = addr;
        }
        if let Some(root) = lookup(ROOT_ENV) {
            self.site.root = PathBuf::from(root);
        }
        self
    }
}
