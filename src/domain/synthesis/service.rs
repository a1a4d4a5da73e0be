use super::preprocess::apply_pronunciations;
use super::{AudioPayload, SpeechRequest};
use crate::domain::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::infrastructure::host::CancelToken;
use crate::infrastructure::providers::SpeechProvider;
use std::sync::Arc;

/// The speech request pipeline: input validation, pronunciation
/// preprocessing, then the provider call.
pub struct SynthesisService {
    provider: Arc<dyn SpeechProvider>,
}

impl SynthesisService {
    pub fn new(provider: Arc<dyn SpeechProvider>) -> Self {
        Self { provider }
    }

    /// Synthesize one piece of text with a snapshot of the current
    /// settings.
    ///
    /// Empty or whitespace-only input is rejected before any network
    /// activity. The cancellation token is honored before the provider
    /// call.
    pub async fn synthesize(
        &self,
        text: &str,
        settings: &Settings,
        cancel: &CancelToken,
    ) -> AppResult<AudioPayload> {
        if text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }

        // 1. Apply the pronunciation dictionary.
        let prepared = apply_pronunciations(text, &settings.pronunciation_dictionary);

        // 2. Diagnostic dump. Settings' Debug impl redacts the API key.
        if settings.debug_mode {
            tracing::debug!(
                text = %prepared,
                settings = ?settings,
                "synthesizing speech"
            );
        }

        tracing::info!(
            model = %settings.model,
            voice = %settings.voice,
            text_length = prepared.len(),
            "Starting speech synthesis"
        );

        // 3. Call the provider.
        cancel.check()?;
        let request = SpeechRequest::from_settings(prepared, settings);
        let payload = self.provider.synthesize(&request).await?;

        tracing::info!(
            audio_size = payload.data.len(),
            content_type = %payload.content_type,
            "Speech synthesis completed"
        );

        Ok(payload)
    }
}
