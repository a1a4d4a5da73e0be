pub mod rodio_output;

pub use rodio_output::RodioOutput;

use crate::domain::synthesis::AudioPayload;
use crate::error::AppResult;
use async_trait::async_trait;

/// Playback seam. The default implementation decodes and plays on the
/// host's default audio device; tests substitute a capturing fake.
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Play the payload at the given volume (0.0–1.0), resolving only once
    /// playback completes or fails.
    async fn play(&self, payload: &AudioPayload, volume: f32) -> AppResult<()>;
}
