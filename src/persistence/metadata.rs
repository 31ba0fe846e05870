use super::files::{atomic_write, read_file};
use crate::domain::{ActiveView, SortKey, StatusFilter};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// View settings stored in meta.json, restored on the next start
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub active_view: ActiveView,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default)]
    pub today_only: bool,
    #[serde(default)]
    pub search: String,
}

/// Load app metadata from meta.json file
pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<AppMetadata> {
    let path = path.as_ref();
    let content = read_file(path)?;
    if content.trim().is_empty() {
        return Ok(AppMetadata::default());
    }

    let metadata: AppMetadata = serde_json::from_str(&content)
        .with_context(|| format!("Invalid metadata in {}", path.display()))?;
    Ok(metadata)
}

/// Save app metadata to meta.json file
pub fn save_metadata<P: AsRef<Path>>(path: P, metadata: &AppMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    atomic_write(path, &json)?;
    Ok(())
}
