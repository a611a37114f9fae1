//! Per-player file implementation of the progress store contract.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use stratum_core::progress::PlayerProgress;
use stratum_core::storage::{ProgressStore, StorageResult};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{FlatFileError, FlatFileResult};

/// On-disk encoding for player records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Structured YAML, `.yml` extension.
    Yaml,
    /// JSON documents, `.json` extension.
    Json,
}

impl FileFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yml",
            Self::Json => "json",
        }
    }

    fn encode(self, progress: &PlayerProgress) -> FlatFileResult<String> {
        match self {
            Self::Yaml => Ok(serde_yaml::to_string(progress)?),
            Self::Json => Ok(serde_json::to_string_pretty(progress)?),
        }
    }

    fn decode(self, raw: &str) -> FlatFileResult<PlayerProgress> {
        match self {
            Self::Yaml => Ok(serde_yaml::from_str(raw)?),
            Self::Json => Ok(serde_json::from_str(raw)?),
        }
    }
}

/// Progress store writing one file per player under a data directory.
pub struct FlatFileProgressStore {
    players_dir: PathBuf,
    format: FileFormat,
}

impl FlatFileProgressStore {
    pub fn new(data_dir: &Path, format: FileFormat) -> Self {
        Self {
            players_dir: data_dir.join("players"),
            format,
        }
    }

    /// YAML-encoded store under `data_dir`.
    pub fn yaml(data_dir: &Path) -> Self {
        Self::new(data_dir, FileFormat::Yaml)
    }

    /// JSON-encoded store under `data_dir`.
    pub fn json(data_dir: &Path) -> Self {
        Self::new(data_dir, FileFormat::Json)
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.players_dir
            .join(format!("{id}.{}", self.format.extension()))
    }
}

#[async_trait]
impl ProgressStore for FlatFileProgressStore {
    async fn initialize(&self) -> StorageResult<()> {
        tokio::fs::create_dir_all(&self.players_dir)
            .await
            .map_err(FlatFileError::from)?;
        info!(dir = %self.players_dir.display(), "flat-file storage initialized");
        Ok(())
    }

    async fn shutdown(&self) -> StorageResult<()> {
        // Writes complete before save() resolves; nothing to drain.
        debug!("flat-file storage shut down");
        Ok(())
    }

    async fn load(&self, id: Uuid) -> StorageResult<Option<PlayerProgress>> {
        let raw = match tokio::fs::read_to_string(self.path_for(id)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(FlatFileError::from(e).into()),
        };
        let progress = self.format.decode(&raw).map_err(FlatFileError::from)?;
        Ok(Some(progress))
    }

    async fn save(&self, progress: &PlayerProgress) -> StorageResult<()> {
        tokio::fs::create_dir_all(&self.players_dir)
            .await
            .map_err(FlatFileError::from)?;
        let encoded = self.format.encode(progress)?;
        tokio::fs::write(self.path_for(progress.id), encoded)
            .await
            .map_err(FlatFileError::from)?;
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> StorageResult<bool> {
        Ok(tokio::fs::try_exists(self.path_for(id))
            .await
            .map_err(FlatFileError::from)?)
    }
}
