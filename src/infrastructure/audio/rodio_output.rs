use super::AudioOutput;
use crate::domain::synthesis::AudioPayload;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::io::Cursor;

/// Default-device playback via rodio.
///
/// Decoding and playback are blocking, so the whole sequence runs under
/// `spawn_blocking`; the future resolves when the sink drains.
pub struct RodioOutput;

impl RodioOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioOutput for RodioOutput {
    async fn play(&self, payload: &AudioPayload, volume: f32) -> AppResult<()> {
        let data = payload.data.clone();
        tracing::info!(
            audio_size = data.len(),
            volume = volume,
            "Playing audio on default output"
        );

        tokio::task::spawn_blocking(move || -> AppResult<()> {
            let (_stream, handle) = rodio::OutputStream::try_default()
                .map_err(|e| AppError::Playback(format!("no audio output device: {}", e)))?;
            let sink = rodio::Sink::try_new(&handle)
                .map_err(|e| AppError::Playback(format!("failed to open audio sink: {}", e)))?;
            let source = rodio::Decoder::new(Cursor::new(data))
                .map_err(|e| AppError::Playback(format!("failed to decode audio: {}", e)))?;

            sink.set_volume(volume);
            sink.append(source);
            sink.sleep_until_end();
            Ok(())
        })
        .await
        .map_err(|e| AppError::Playback(format!("playback task failed: {}", e)))?
    }
}
