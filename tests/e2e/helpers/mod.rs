use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use speechsynth::domain::settings::Settings;
use speechsynth::domain::synthesis::AudioPayload;
use speechsynth::error::{AppError, AppResult};
use speechsynth::infrastructure::audio::AudioOutput;
use speechsynth::infrastructure::host::{
    MediaStorage, NotificationSink, SelectionSource, SettingsStorage,
};
use speechsynth::infrastructure::providers::OpenAiSpeechProvider;
use speechsynth::SpeechSynth;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const FAKE_AUDIO: &[u8] = b"ID3 fake mp3 payload";
pub const VALID_KEY: &str = "sk-test-key";

// ---------------------------------------------------------------------------
// Mock TTS provider
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ProviderState {
    requests: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

pub struct MockProvider {
    base_url: String,
    state: Arc<ProviderState>,
}

impl MockProvider {
    pub fn endpoint(&self) -> String {
        format!("{}/v1/audio/speech", self.base_url)
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    /// The `input` field of every request body, in arrival order.
    pub fn inputs(&self) -> Vec<String> {
        self.state.inputs.lock().unwrap().clone()
    }
}

async fn speech_handler(
    State(state): State<Arc<ProviderState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> axum::response::Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let input = body["input"].as_str().unwrap_or_default().to_string();
    state.inputs.lock().unwrap().push(input.clone());

    let expected = format!("Bearer {}", VALID_KEY);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "invalid_api_key" })),
        )
            .into_response();
    }

    if input.contains("[FAIL]") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "synthesis_failed" })),
        )
            .into_response();
    }

    // A 2xx with no bytes, as some misbehaving providers produce.
    if input.contains("[EMPTY]") {
        return ([(header::CONTENT_TYPE, "audio/mpeg")], Vec::new()).into_response();
    }

    // Stalls long enough for any short client timeout to fire.
    if input.contains("[SLOW]") {
        tokio::time::sleep(std::time::Duration::from_secs(30)).await;
    }

    (
        [(header::CONTENT_TYPE, "audio/mpeg")],
        FAKE_AUDIO.to_vec(),
    )
        .into_response()
}

pub async fn start_mock_provider() -> MockProvider {
    let state = Arc::new(ProviderState::default());
    let app = Router::new()
        .route("/v1/audio/speech", post(speech_handler))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock provider");
    let addr = listener.local_addr().expect("failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockProvider {
        base_url: format!("http://{}", addr),
        state,
    }
}

// ---------------------------------------------------------------------------
// In-memory host fakes
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemorySettingsStorage {
    record: Mutex<Option<serde_json::Value>>,
}

impl MemorySettingsStorage {
    pub fn seeded(record: serde_json::Value) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }

    pub fn record(&self) -> Option<serde_json::Value> {
        self.record.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsStorage for MemorySettingsStorage {
    async fn load(&self) -> AppResult<Option<serde_json::Value>> {
        Ok(self.record.lock().unwrap().clone())
    }

    async fn save(&self, record: serde_json::Value) -> AppResult<()> {
        *self.record.lock().unwrap() = Some(record);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryMediaStorage {
    folders: Mutex<BTreeSet<String>>,
    texts: Mutex<BTreeMap<String, String>>,
    blobs: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryMediaStorage {
    pub fn add_folder(&self, folder: &str) {
        self.folders.lock().unwrap().insert(folder.to_string());
    }

    pub fn add_text(&self, folder: &str, name: &str, text: &str) {
        self.add_folder(folder);
        self.texts
            .lock()
            .unwrap()
            .insert(format!("{}/{}", folder, name), text.to_string());
    }

    pub fn blobs(&self) -> BTreeMap<String, Vec<u8>> {
        self.blobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStorage for MemoryMediaStorage {
    async fn write_blob(&self, path: &str, data: &[u8]) -> AppResult<()> {
        self.blobs
            .lock()
            .unwrap()
            .insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn list_text_items(&self, folder: &str) -> AppResult<Vec<String>> {
        if !self.folders.lock().unwrap().contains(folder) {
            return Err(AppError::Configuration(format!(
                "no valid target folder found at {}",
                folder
            )));
        }
        let prefix = format!("{}/", folder);
        Ok(self
            .texts
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn read_text(&self, path: &str) -> AppResult<String> {
        self.texts
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| AppError::Configuration(format!("no such item: {}", path)))
    }
}

#[derive(Default)]
pub struct CapturingAudio {
    plays: Mutex<Vec<f32>>,
}

impl CapturingAudio {
    pub fn volumes(&self) -> Vec<f32> {
        self.plays.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioOutput for CapturingAudio {
    async fn play(&self, _payload: &AudioPayload, volume: f32) -> AppResult<()> {
        self.plays.lock().unwrap().push(volume);
        Ok(())
    }
}

#[derive(Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.messages().iter().any(|m| m.contains(fragment))
    }
}

impl NotificationSink for CollectingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct FixedSelection(pub Option<String>);

impl SelectionSource for FixedSelection {
    fn current_selection(&self) -> Option<String> {
        self.0.clone()
    }
}

// ---------------------------------------------------------------------------
// Test context
// ---------------------------------------------------------------------------

/// Baseline settings for tests: mock endpoint, valid key, audible and
/// saving, no text note (tests that want one opt in).
pub fn test_settings(endpoint: &str) -> Settings {
    let mut settings = Settings::default();
    settings.api_url = endpoint.to_string();
    settings.api_key = VALID_KEY.to_string();
    settings.create_text_note = false;
    settings.volume = 0.8;
    settings
}

pub struct TestContext {
    pub app: SpeechSynth,
    pub settings_storage: Arc<MemorySettingsStorage>,
    pub media_storage: Arc<MemoryMediaStorage>,
    pub audio: Arc<CapturingAudio>,
    pub notifier: Arc<CollectingNotifier>,
}

impl TestContext {
    pub async fn new(settings: Settings, selection: Option<String>) -> Self {
        let record = serde_json::to_value(&settings).expect("settings serialize");
        let settings_storage = Arc::new(MemorySettingsStorage::seeded(record));
        Self::with_storage(settings_storage, selection).await
    }

    pub async fn with_storage(
        settings_storage: Arc<MemorySettingsStorage>,
        selection: Option<String>,
    ) -> Self {
        let media_storage = Arc::new(MemoryMediaStorage::default());
        let audio = Arc::new(CapturingAudio::default());
        let notifier = Arc::new(CollectingNotifier::default());

        let app = SpeechSynth::load(
            settings_storage.clone(),
            media_storage.clone(),
            Arc::new(OpenAiSpeechProvider::new()),
            audio.clone(),
            notifier.clone(),
            Arc::new(FixedSelection(selection)),
        )
        .await;

        Self {
            app,
            settings_storage,
            media_storage,
            audio,
            notifier,
        }
    }
}
