pub mod preprocess;
pub mod service;

pub use preprocess::apply_pronunciations;
pub use service::SynthesisService;

use crate::domain::settings::Settings;
use std::fmt;
use std::time::Duration;

/// Per-invocation snapshot of everything the provider needs.
/// Derived from the settings at call time, never persisted.
#[derive(Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub model: String,
    pub voice: String,
    pub speed: Option<f32>,
    pub pitch: Option<f32>,
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl SpeechRequest {
    /// Snapshot the synthesis parameters for one call. `speed`/`pitch` are
    /// included only when their inclusion flag is set, so providers that
    /// reject unknown fields keep working.
    pub fn from_settings(text: impl Into<String>, settings: &Settings) -> Self {
        Self {
            text: text.into(),
            model: settings.model.clone(),
            voice: settings.voice.clone(),
            speed: settings.send_speed.then_some(settings.speed),
            pitch: settings.send_pitch.then_some(settings.pitch),
            endpoint: settings.api_url.clone(),
            api_key: settings.api_key.clone(),
            timeout: Duration::from_secs(settings.request_timeout_secs),
        }
    }
}

impl fmt::Debug for SpeechRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechRequest")
            .field("text_length", &self.text.len())
            .field("model", &self.model)
            .field("voice", &self.voice)
            .field("speed", &self.speed)
            .field("pitch", &self.pitch)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Opaque audio returned by the provider; lives for one pipeline
/// invocation only.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    pub data: Vec<u8>,
    pub content_type: String,
}

impl AudioPayload {
    /// File extension matching the payload's content type.
    pub fn extension(&self) -> &'static str {
        let content_type = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        match content_type {
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            "audio/ogg" | "application/ogg" => "ogg",
            "audio/flac" | "audio/x-flac" => "flac",
            "audio/aac" => "aac",
            // The default provider answers audio/mpeg; fall back to mp3 for
            // anything unrecognized rather than refusing to name the file.
            _ => "mp3",
        }
    }
}
