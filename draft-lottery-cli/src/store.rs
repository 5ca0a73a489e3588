//! JSON-file implementations of the engine's configuration and pick storage.
use draft_lottery::{ConfigError, ConfigSource, DraftConfig, DraftPick, PickStore};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid draft configuration")]
    Invalid(#[from] ConfigError),
}

/// Configuration read from an optional JSON file, with command-line overrides.
#[derive(Debug, Clone, Default)]
pub struct FileConfigSource {
    pub path: Option<PathBuf>,
    pub rounds: Option<u32>,
    pub order: Option<Vec<u32>>,
}

impl ConfigSource for FileConfigSource {
    type Error = StoreError;

    fn load_config(&self) -> Result<DraftConfig, Self::Error> {
        let mut config = match &self.path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
                    path: path.clone(),
                    source,
                })?;
                DraftConfig::from_json(&raw).map_err(|source| StoreError::Json {
                    path: path.clone(),
                    source,
                })?
            }
            None => DraftConfig::default_config(),
        };
        if let Some(rounds) = self.rounds {
            config.round_count = rounds;
        }
        config.validate()?;
        log::debug!(
            "loaded config: {} teams, {} rounds, movement cap {}",
            config.team_count,
            config.round_count,
            config.settings.max_movement
        );
        Ok(config)
    }

    fn load_initial_order(&self) -> Result<Option<Vec<u32>>, Self::Error> {
        Ok(self.order.clone())
    }
}

/// Pick list stored as pretty JSON; a store without a path discards writes.
#[derive(Debug, Clone, Default)]
pub struct JsonPickStore {
    path: Option<PathBuf>,
}

impl JsonPickStore {
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    fn io_error(path: &Path, source: io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl PickStore for JsonPickStore {
    type Error = StoreError;

    fn save_picks(&self, picks: &[DraftPick]) -> Result<(), Self::Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let payload = serde_json::to_vec_pretty(picks).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(path, payload).map_err(|source| Self::io_error(path, source))?;
        log::info!("saved {} picks to {}", picks.len(), path.display());
        Ok(())
    }

    fn load_picks(&self) -> Result<Option<Vec<DraftPick>>, Self::Error> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(Self::io_error(path, err)),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })
    }

    fn clear_picks(&self) -> Result<(), Self::Error> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::io_error(path, err)),
        }
    }
}
