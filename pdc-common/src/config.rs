//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the root data folder
pub const ROOT_FOLDER_ENV: &str = "PDC_ROOT_FOLDER";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `PDC_ROOT_FOLDER` environment variable
/// 3. `root_folder` key in the platform config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(config_path) = platform_config_file() {
        if let Ok(contents) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&contents) {
                if let Some(root) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Platform config file location (`~/.config/pdc/config.toml` or equivalent)
fn platform_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdc").join("config.toml"))
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("pdc"))
        .unwrap_or_else(|| PathBuf::from("./pdc_data"))
}

/// Database file path inside the root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join("pdc.db")
}

/// Ensure the root folder exists, creating it if needed
pub fn ensure_root_folder(root_folder: &Path) -> Result<()> {
    std::fs::create_dir_all(root_folder)?;
    Ok(())
}

/// Image host settings for the upload relay
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageHostConfig {
    /// Upload endpoint of the external image hosting service
    pub upload_url: String,
    /// API key sent with every upload
    pub api_key: String,
    /// Remote folder the uploads land in
    pub folder: String,
}

impl Default for ImageHostConfig {
    fn default() -> Self {
        Self {
            upload_url: "https://images.example.com/v1/upload".to_string(),
            api_key: String::new(),
            folder: "pdi-pro-inspections".to_string(),
        }
    }
}

/// Server settings, loaded from `<root>/config.toml` with environment
/// variable overrides (`PDC_HOST`, `PDC_PORT`, `PDC_IMAGE_HOST_URL`,
/// `PDC_IMAGE_HOST_KEY`). Missing files and keys fall back to defaults;
/// configuration never aborts startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub image_host: ImageHostConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            image_host: ImageHostConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the root folder, then apply env overrides
    pub fn load(root_folder: &Path) -> Result<Self> {
        let mut config = Self::load_file(&root_folder.join("config.toml"))?;

        if let Ok(host) = std::env::var("PDC_HOST") {
            if !host.is_empty() {
                config.host = host;
            }
        }
        if let Ok(port) = std::env::var("PDC_PORT") {
            config.port = port
                .parse()
                .map_err(|_| Error::Config(format!("invalid PDC_PORT value: {}", port)))?;
        }
        if let Ok(url) = std::env::var("PDC_IMAGE_HOST_URL") {
            if !url.is_empty() {
                config.image_host.upload_url = url;
            }
        }
        if let Ok(key) = std::env::var("PDC_IMAGE_HOST_KEY") {
            if !key.is_empty() {
                config.image_host.api_key = key;
            }
        }

        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
