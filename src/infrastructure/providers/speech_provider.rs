use crate::domain::synthesis::{AudioPayload, SpeechRequest};
use crate::error::AppResult;
use async_trait::async_trait;

/// Provider abstraction for speech synthesis.
/// Implementations own the wire format and provider-specific error
/// reporting; the endpoint, credentials and timeout arrive in the request
/// snapshot so a single instance can serve any configured provider.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize one request into an audio payload.
    ///
    /// # Errors
    /// `Network` on transport failure or timeout, `Api` on a non-success
    /// response (carrying status and the provider's error detail) or an
    /// empty audio body.
    async fn synthesize(&self, request: &SpeechRequest) -> AppResult<AudioPayload>;
}
