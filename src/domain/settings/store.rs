use super::model::Settings;
use crate::error::{AppError, AppResult};
use crate::infrastructure::host::SettingsStorage;
use std::sync::Arc;

/// Load/save contract for the settings record.
///
/// `load` merges persisted data over the default record (persisted values
/// win, absent fields fall back, a shallow merge). `save` overwrites the
/// whole record; no validation happens here, invalid stored values only
/// matter when consumed downstream.
pub struct SettingsStore {
    storage: Arc<dyn SettingsStorage>,
}

impl SettingsStore {
    pub fn new(storage: Arc<dyn SettingsStorage>) -> Self {
        Self { storage }
    }

    pub async fn load(&self) -> Settings {
        match self.storage.load().await {
            Ok(Some(record)) => match serde_json::from_value(record) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(error = %e, "stored settings unreadable, using defaults");
                    Settings::default()
                }
            },
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load settings, using defaults");
                Settings::default()
            }
        }
    }

    pub async fn save(&self, settings: &Settings) -> AppResult<()> {
        let record = serde_json::to_value(settings)
            .map_err(|e| AppError::Configuration(format!("failed to serialize settings: {}", e)))?;
        self.storage.save(record).await
    }
}
