//! Never-failing configuration loader.

use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// A missing file is created with the serialized defaults so operators
    /// have something to edit. Any read, parse, or write failure degrades
    /// to the in-memory defaults with a warning; startup never aborts here.
    pub async fn load(path: &Path) -> Config {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => match serde_yaml::from_str(&raw) {
                Ok(config) => {
                    info!(path = %path.display(), "configuration loaded");
                    config
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "invalid configuration, using defaults");
                    Config::default()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                let config = Config::default();
                if let Err(error) = write_default(path, &config).await {
                    warn!(path = %path.display(), %error, "could not create default config file");
                } else {
                    info!(path = %path.display(), "created default config file");
                }
                config
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "could not read configuration, using defaults");
                Config::default()
            }
        }
    }
}

async fn write_default(path: &Path, config: &Config) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let rendered = serde_yaml::to_string(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    tokio::fs::write(path, rendered).await
}
