use super::speech_provider::SpeechProvider;
use crate::domain::synthesis::{AudioPayload, SpeechRequest};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Serialize;

const DEFAULT_CONTENT_TYPE: &str = "audio/mpeg";

/// Body of `POST <endpoint>` for OpenAI-compatible speech APIs.
/// Optional fields are omitted from the JSON entirely so providers that
/// reject unknown fields stay compatible.
#[derive(Debug, Serialize)]
struct SpeechRequestBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pitch: Option<f32>,
}

/// Speech provider for the OpenAI `/v1/audio/speech` wire format.
/// The endpoint URL comes from the request snapshot, so compatible
/// third-party or self-hosted providers work unchanged.
pub struct OpenAiSpeechProvider {
    http_client: reqwest::Client,
}

impl OpenAiSpeechProvider {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }
}

impl Default for OpenAiSpeechProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechProvider for OpenAiSpeechProvider {
    async fn synthesize(&self, request: &SpeechRequest) -> AppResult<AudioPayload> {
        tracing::info!(
            endpoint = %request.endpoint,
            model = %request.model,
            voice = %request.voice,
            text_length = request.text.len(),
            "Calling speech synthesis API"
        );

        let body = SpeechRequestBody {
            model: &request.model,
            input: &request.text,
            voice: &request.voice,
            speed: request.speed,
            pitch: request.pitch,
        };

        let response = self
            .http_client
            .post(&request.endpoint)
            .bearer_auth(&request.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, endpoint = %request.endpoint, "speech request failed");
                if e.is_timeout() {
                    AppError::Network(format!(
                        "request timed out after {}s",
                        request.timeout.as_secs()
                    ))
                } else {
                    AppError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            // Prefer the provider's structured error body; fall back to the
            // raw text or a generic message.
            let detail = match serde_json::from_str::<serde_json::Value>(&body_text) {
                Ok(value) => value.to_string(),
                Err(_) if !body_text.trim().is_empty() => body_text,
                Err(_) => "no error detail provided".to_string(),
            };
            tracing::error!(
                status = status.as_u16(),
                detail = %detail,
                "speech synthesis API returned an error"
            );
            return Err(AppError::Api {
                status: status.as_u16(),
                status_text,
                detail,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let data = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(format!("failed to read audio body: {}", e)))?
            .to_vec();

        if data.is_empty() {
            return Err(AppError::Api {
                status: status.as_u16(),
                status_text,
                detail: "provider returned no audio data".to_string(),
            });
        }

        tracing::debug!(
            audio_size = data.len(),
            content_type = %content_type,
            "audio payload received"
        );

        Ok(AudioPayload { data, content_type })
    }
}
