use crate::domain::settings::Settings;
use crate::domain::synthesis::AudioPayload;
use crate::error::{AppError, AppResult};
use crate::infrastructure::audio::AudioOutput;
use crate::infrastructure::host::{CancelToken, MediaStorage, NotificationSink};
use chrono::Utc;
use std::sync::Arc;

/// Result of one dispatch: the save and playback effects are independent,
/// so both failures can be present at once.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    pub saved_path: Option<String>,
    pub note_path: Option<String>,
    pub save_error: Option<AppError>,
    pub playback_error: Option<AppError>,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        self.save_error.is_none() && self.playback_error.is_none()
    }

    /// Collapse into a result, surfacing the save failure first.
    /// Both effects have already been attempted by the time this is called.
    pub fn into_result(self) -> AppResult<()> {
        if let Some(err) = self.save_error {
            return Err(err);
        }
        if let Some(err) = self.playback_error {
            return Err(err);
        }
        Ok(())
    }
}

/// Performs the post-synthesis side effects in sequence: optional save to
/// durable storage, optional text note, then playback. A failure in one
/// effect is reported to the user but never suppresses the others.
pub struct OutputDispatcher {
    storage: Arc<dyn MediaStorage>,
    audio: Arc<dyn AudioOutput>,
    notifier: Arc<dyn NotificationSink>,
}

impl OutputDispatcher {
    pub fn new(
        storage: Arc<dyn MediaStorage>,
        audio: Arc<dyn AudioOutput>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            storage,
            audio,
            notifier,
        }
    }

    pub async fn dispatch(
        &self,
        payload: &AudioPayload,
        source_text: &str,
        settings: &Settings,
        cancel: &CancelToken,
    ) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        let stem = file_stem();

        if settings.save_audio_file && !cancel.is_cancelled() {
            let file_name = format!("{}.{}", stem, payload.extension());
            let path = join_path(&settings.save_audio_file_path, &file_name);
            match self.storage.write_blob(&path, &payload.data).await {
                Ok(()) => {
                    tracing::info!(path = %path, audio_size = payload.data.len(), "audio file saved");
                    self.notifier.notify(&format!("Audio saved to {}", path));
                    outcome.saved_path = Some(path);
                }
                Err(e) => {
                    tracing::error!(path = %path, error = %e, "failed to save audio file");
                    self.notifier
                        .notify(&format!("Failed to save audio file: {}", e));
                    outcome.save_error = Some(e);
                }
            }
        }

        if settings.create_text_note && !cancel.is_cancelled() {
            let path = join_path(&settings.create_text_note_path, &format!("{}.md", stem));
            match self
                .storage
                .write_blob(&path, source_text.as_bytes())
                .await
            {
                Ok(()) => {
                    tracing::info!(path = %path, "text note created");
                    outcome.note_path = Some(path);
                }
                Err(e) => {
                    // Note creation shares the save pipeline; it is reported
                    // the same way and is just as non-fatal.
                    tracing::error!(path = %path, error = %e, "failed to create text note");
                    self.notifier
                        .notify(&format!("Failed to create text note: {}", e));
                }
            }
        }

        if settings.playback_enabled && !cancel.is_cancelled() {
            match self.audio.play(payload, settings.volume).await {
                Ok(()) => {
                    tracing::debug!("playback finished");
                }
                Err(e) => {
                    tracing::error!(error = %e, "audio playback failed");
                    self.notifier.notify(&format!("Playback failed: {}", e));
                    outcome.playback_error = Some(e);
                }
            }
        }

        outcome
    }
}

/// Collision-resistant file stem: a UTC timestamp down to milliseconds, so
/// same-day (and same-second) recordings never overwrite each other.
fn file_stem() -> String {
    format!("speech-{}", Utc::now().format("%Y%m%d-%H%M%S%3f"))
}

/// Join a configured folder and a file name into a storage path,
/// collapsing duplicate separators. An empty folder means the storage
/// root.
fn join_path(folder: &str, file_name: &str) -> String {
    let mut parts: Vec<&str> = folder.split('/').filter(|s| !s.is_empty()).collect();
    parts.push(file_name);
    parts.join("/")
}
