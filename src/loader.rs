//! Dataset Loader - one-time read of the backing JSON file

use crate::error::{DashboardError, Result};
use crate::insight::Insight;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};

pub const DEFAULT_FILE_NAME: &str = "jsondata.json";

/// Working directory first, then its parent.
pub fn default_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from(DEFAULT_FILE_NAME),
        PathBuf::from("..").join(DEFAULT_FILE_NAME),
    ]
}

#[derive(Debug)]
struct LoadedDataset {
    records: Arc<[Insight]>,
    source: Option<PathBuf>,
}

/// Lazily reads the dataset on first access and holds it for the life of the
/// loader. A failed load is cached too: there is no retry until restart.
#[derive(Debug)]
pub struct DatasetLoader {
    candidates: Vec<PathBuf>,
    cache: OnceLock<std::result::Result<LoadedDataset, String>>,
}

impl DatasetLoader {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            cache: OnceLock::new(),
        }
    }

    /// Loader that is already populated; ids are assigned the same way a
    /// file load would assign them.
    pub fn from_records(mut records: Vec<Insight>) -> Self {
        assign_ids(&mut records);
        let cache = OnceLock::new();
        let _ = cache.set(Ok(LoadedDataset {
            records: Arc::from(records),
            source: None,
        }));
        Self {
            candidates: Vec::new(),
            cache,
        }
    }

    pub fn dataset(&self) -> Result<Arc<[Insight]>> {
        match self.cache.get_or_init(|| self.load()) {
            Ok(loaded) => Ok(Arc::clone(&loaded.records)),
            Err(message) => Err(DashboardError::DataUnavailable(message.clone())),
        }
    }

    /// File the dataset was read from, once loaded.
    pub fn source_path(&self) -> Option<&Path> {
        match self.cache.get() {
            Some(Ok(loaded)) => loaded.source.as_deref(),
            _ => None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.cache.get().is_some()
    }

    fn load(&self) -> std::result::Result<LoadedDataset, String> {
        let result = self.locate().and_then(|path| match read_dataset(&path) {
            Ok(records) => Ok((path, records)),
            Err(e) => Err(with_path(&path, e)),
        });

        match result {
            Ok((path, records)) => {
                info!("Loaded {} insights from {}", records.len(), path.display());
                Ok(LoadedDataset {
                    records: Arc::from(records),
                    source: Some(path),
                })
            }
            Err(e) => {
                error!("Error reading JSON data: {}", e);
                Err(match e {
                    DashboardError::DataUnavailable(message) => message,
                    other => other.to_string(),
                })
            }
        }
    }

    fn locate(&self) -> Result<PathBuf> {
        self.candidates
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| {
                let tried: Vec<String> = self
                    .candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect();
                DashboardError::DataUnavailable(format!(
                    "{} not found (tried: {})",
                    DEFAULT_FILE_NAME,
                    tried.join(", ")
                ))
            })
    }
}

fn read_dataset(path: &Path) -> Result<Vec<Insight>> {
    let content = std::fs::read_to_string(path)?;
    let mut records: Vec<Insight> = serde_json::from_str(&content)?;
    assign_ids(&mut records);
    Ok(records)
}

fn with_path(path: &Path, err: DashboardError) -> DashboardError {
    let message = match err {
        DashboardError::Io(e) => format!("Failed to read {}: {}", path.display(), e),
        DashboardError::Json(e) => format!("Failed to parse {}: {}", path.display(), e),
        DashboardError::DataUnavailable(message) => message,
        other => other.to_string(),
    };
    DashboardError::DataUnavailable(message)
}

fn assign_ids(records: &mut [Insight]) {
    for (index, record) in records.iter_mut().enumerate() {
        if record.id.is_empty() {
            record.id = format!("id-{}", index);
        }
    }

    let mut seen = HashSet::with_capacity(records.len());
    let duplicates = records.iter().filter(|r| !seen.insert(r.id.as_str())).count();
    if duplicates > 0 {
        warn!("{} insights share an id with an earlier record", duplicates);
    }
}
