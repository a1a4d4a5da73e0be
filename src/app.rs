use crate::domain::batch::{BatchReport, BatchRunner};
use crate::domain::dispatch::{DispatchOutcome, OutputDispatcher};
use crate::domain::settings::{reducer, Settings, SettingsEvent, SettingsStore};
use crate::domain::synthesis::SynthesisService;
use crate::error::{AppError, AppResult};
use crate::infrastructure::audio::AudioOutput;
use crate::infrastructure::host::{
    CancelToken, MediaStorage, NotificationSink, SelectionSource, SettingsStorage,
};
use crate::infrastructure::providers::SpeechProvider;
use std::sync::{Arc, RwLock};

/// The plugin facade: owns the in-memory settings record and exposes the
/// user-facing commands. All host specifics arrive through the collaborator
/// traits, so the same core runs under an editor plugin, the CLI binary or
/// the test harness.
pub struct SpeechSynth {
    settings: RwLock<Settings>,
    store: SettingsStore,
    synthesis: Arc<SynthesisService>,
    dispatcher: Arc<OutputDispatcher>,
    batch: Arc<BatchRunner>,
    notifier: Arc<dyn NotificationSink>,
    selection: Arc<dyn SelectionSource>,
}

impl SpeechSynth {
    /// Load settings and wire the pipeline services.
    pub async fn load(
        settings_storage: Arc<dyn SettingsStorage>,
        media_storage: Arc<dyn MediaStorage>,
        provider: Arc<dyn SpeechProvider>,
        audio: Arc<dyn AudioOutput>,
        notifier: Arc<dyn NotificationSink>,
        selection: Arc<dyn SelectionSource>,
    ) -> Self {
        let store = SettingsStore::new(settings_storage);
        let settings = store.load().await;

        let synthesis = Arc::new(SynthesisService::new(provider));
        let dispatcher = Arc::new(OutputDispatcher::new(
            media_storage.clone(),
            audio,
            notifier.clone(),
        ));
        let batch = Arc::new(BatchRunner::new(
            media_storage,
            synthesis.clone(),
            dispatcher.clone(),
            notifier.clone(),
        ));

        tracing::info!("Speech synthesis core loaded");

        Self {
            settings: RwLock::new(settings),
            store,
            synthesis,
            dispatcher,
            batch,
            notifier,
            selection,
        }
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> Settings {
        self.settings.read().unwrap().clone()
    }

    /// Session-only API key override (e.g. from the environment).
    /// Deliberately not persisted: the stored record keeps whatever the
    /// user configured.
    pub fn set_session_api_key(&self, api_key: String) {
        self.settings.write().unwrap().api_key = api_key;
    }

    /// Apply one field-changed event to the in-memory record and persist
    /// the whole record. The in-memory copy is updated before persistence,
    /// so subsequent reads see the change even if the save fails.
    pub async fn update_settings(&self, event: SettingsEvent) -> AppResult<()> {
        let snapshot = {
            let mut settings = self.settings.write().unwrap();
            reducer::apply(&mut settings, event);
            settings.clone()
        };
        self.store.save(&snapshot).await
    }

    /// The "read selected text" command: fetch the current selection and
    /// run it through the pipeline. Reports through the notification sink
    /// on failure, mirroring a host command handler.
    pub async fn read_selection(&self, cancel: &CancelToken) -> AppResult<DispatchOutcome> {
        let selection = self
            .selection
            .current_selection()
            .filter(|text| !text.trim().is_empty());

        let Some(text) = selection else {
            self.notifier.notify("No text selected");
            return Err(AppError::EmptyInput);
        };

        self.speak(&text, cancel).await
    }

    /// Synthesize one piece of text and dispatch the audio. Synthesis
    /// failures are presented to the user and propagated; dispatch
    /// failures are already reported per-effect and returned in the
    /// outcome.
    pub async fn speak(&self, text: &str, cancel: &CancelToken) -> AppResult<DispatchOutcome> {
        let settings = self.settings();

        let payload = match self.synthesis.synthesize(text, &settings, cancel).await {
            Ok(payload) => payload,
            Err(e) => {
                self.notifier
                    .notify(&format!("Error synthesizing speech: {}", e));
                return Err(e);
            }
        };

        Ok(self
            .dispatcher
            .dispatch(&payload, text, &settings, cancel)
            .await)
    }

    /// Run the pipeline over every text item under a folder.
    pub async fn run_batch(&self, folder: &str, cancel: &CancelToken) -> AppResult<BatchReport> {
        let settings = self.settings();
        match self.batch.run(folder, &settings, cancel).await {
            Ok(report) => Ok(report),
            Err(e) => {
                self.notifier.notify(&format!("Batch failed: {}", e));
                Err(e)
            }
        }
    }
}
