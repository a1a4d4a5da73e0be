//! Filesystem-backed host collaborators, used by the CLI binary and by
//! the filesystem tests. A plugin host would supply its own
//! implementations over its vault API instead.

use crate::error::{AppError, AppResult};
use crate::infrastructure::host::{MediaStorage, SettingsStorage};
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Extensions treated as text-bearing items for batch runs.
const TEXT_EXTENSIONS: &[&str] = &["md", "txt"];

/// Blob and text-item storage rooted at a directory.
pub struct FsMediaStorage {
    root: PathBuf,
}

impl FsMediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl MediaStorage for FsMediaStorage {
    async fn write_blob(&self, path: &str, data: &[u8]) -> AppResult<()> {
        let full_path = self.resolve(path);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::StorageWrite(format!("{}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&full_path, data)
            .await
            .map_err(|e| AppError::StorageWrite(format!("{}: {}", full_path.display(), e)))
    }

    async fn list_text_items(&self, folder: &str) -> AppResult<Vec<String>> {
        let dir = self.resolve(folder);
        if !dir.is_dir() {
            return Err(AppError::Configuration(format!(
                "no valid target folder found at {}",
                dir.display()
            )));
        }

        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .with_context(|| format!("failed to read folder {}", dir.display()))?;

        let mut items = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("failed to read folder {}", dir.display()))?
        {
            let path = entry.path();
            if path.is_file() && is_text_item(&path) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    let folder = folder.trim_matches('/');
                    let item = if folder.is_empty() {
                        name.to_string()
                    } else {
                        format!("{}/{}", folder, name)
                    };
                    items.push(item);
                }
            }
        }
        Ok(items)
    }

    async fn read_text(&self, path: &str) -> AppResult<String> {
        let full_path = self.resolve(path);
        let text = tokio::fs::read_to_string(&full_path)
            .await
            .with_context(|| format!("failed to read {}", full_path.display()))?;
        Ok(text)
    }
}

fn is_text_item(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TEXT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Settings persistence as a single JSON file.
pub struct FsSettingsStorage {
    path: PathBuf,
}

impl FsSettingsStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsStorage for FsSettingsStorage {
    async fn load(&self) -> AppResult<Option<serde_json::Value>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let record = serde_json::from_str(&contents).map_err(|e| {
                    AppError::Configuration(format!(
                        "settings file {} is not valid JSON: {}",
                        self.path.display(),
                        e
                    ))
                })?;
                Ok(Some(record))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Configuration(format!(
                "failed to read settings file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn save(&self, record: serde_json::Value) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::StorageWrite(format!("{}: {}", parent.display(), e)))?;
            }
        }
        let contents = serde_json::to_string_pretty(&record)
            .map_err(|e| AppError::Configuration(format!("failed to encode settings: {}", e)))?;
        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| AppError::StorageWrite(format!("{}: {}", self.path.display(), e)))
    }
}
