use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Default provider endpoint. The URL is fully configurable so compatible
/// third-party or self-hosted providers can be used instead.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/audio/speech";

pub const SPEED_RANGE: RangeInclusive<f32> = 0.5..=2.0;
pub const PITCH_RANGE: RangeInclusive<f32> = 0.5..=2.0;
pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// The persisted configuration record.
///
/// Loaded once at startup and persisted as a whole on every field change.
/// `#[serde(default)]` gives the shallow-merge load semantics: any field
/// absent from storage falls back to its default, while present fields
/// (including the pronunciation dictionary) are taken wholesale.
///
/// Keys are camelCase to stay compatible with the record the original
/// plugin persisted.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    // Credentials
    pub api_key: String,
    pub api_url: String,

    // Synthesis parameters
    pub model: String,
    pub voice: String,
    pub language: String,
    pub speed: f32,
    pub pitch: f32,

    /// Include `speed` in the request body. Off for providers that reject
    /// unknown fields.
    pub send_speed: bool,
    /// Include `pitch` in the request body. Off by default: the stock
    /// OpenAI speech endpoint does not accept it.
    pub send_pitch: bool,

    // Output behavior
    pub save_audio_file: bool,
    pub save_audio_file_path: String,
    pub playback_enabled: bool,
    pub volume: f32,

    // Text note written alongside the audio after a synthesis. The aliases
    // keep records persisted under the feature's old key readable.
    #[serde(alias = "createNewFileAfterRecording")]
    pub create_text_note: bool,
    #[serde(alias = "createNewFileAfterRecordingPath")]
    pub create_text_note_path: String,

    pub pronunciation_dictionary: PronunciationDictionary,

    // Feature flags
    pub batch_processing_enabled: bool,
    pub experimental_features_enabled: bool,
    pub advanced_settings_visible: bool,

    // Diagnostics
    pub debug_mode: bool,

    // Network
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            language: "en".to_string(),
            speed: 1.0,
            pitch: 1.0,
            send_speed: true,
            send_pitch: false,
            save_audio_file: true,
            save_audio_file_path: String::new(),
            playback_enabled: true,
            volume: 1.0,
            create_text_note: true,
            create_text_note_path: String::new(),
            pronunciation_dictionary: PronunciationDictionary::default(),
            batch_processing_enabled: false,
            experimental_features_enabled: false,
            advanced_settings_visible: false,
            debug_mode: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

// Hand-written so the API key can never end up in a log line, including
// the debug-mode settings dump.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("voice", &self.voice)
            .field("language", &self.language)
            .field("speed", &self.speed)
            .field("pitch", &self.pitch)
            .field("send_speed", &self.send_speed)
            .field("send_pitch", &self.send_pitch)
            .field("save_audio_file", &self.save_audio_file)
            .field("save_audio_file_path", &self.save_audio_file_path)
            .field("playback_enabled", &self.playback_enabled)
            .field("volume", &self.volume)
            .field("create_text_note", &self.create_text_note)
            .field("create_text_note_path", &self.create_text_note_path)
            .field("pronunciation_dictionary", &self.pronunciation_dictionary)
            .field("batch_processing_enabled", &self.batch_processing_enabled)
            .field(
                "experimental_features_enabled",
                &self.experimental_features_enabled,
            )
            .field("advanced_settings_visible", &self.advanced_settings_visible)
            .field("debug_mode", &self.debug_mode)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// One user-defined pronunciation override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronunciationEntry {
    pub word: String,
    pub replacement: String,
}

/// Ordered word-to-replacement mapping applied before synthesis.
///
/// Persisted as a JSON array so insertion order (the substitution order) is
/// stable across sessions. The legacy persisted form was a JSON object; it
/// is still accepted on load and ordered by its key order, which keeps the
/// substitution pass deterministic for old records too.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PronunciationDictionary {
    entries: Vec<PronunciationEntry>,
}

impl PronunciationDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PronunciationEntry> {
        self.entries.iter()
    }

    /// Insert or update an override. Words match case-insensitively, so an
    /// existing entry for the same word is updated in place and keeps its
    /// position in the substitution order.
    pub fn set(&mut self, word: impl Into<String>, replacement: impl Into<String>) {
        let word = word.into();
        let replacement = replacement.into();
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.word.eq_ignore_ascii_case(&word))
        {
            entry.replacement = replacement;
        } else {
            self.entries.push(PronunciationEntry { word, replacement });
        }
    }

    /// Remove an override; returns whether an entry was removed.
    pub fn remove(&mut self, word: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| !e.word.eq_ignore_ascii_case(word));
        self.entries.len() != before
    }
}

impl FromIterator<(String, String)> for PronunciationDictionary {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        for (word, replacement) in iter {
            dictionary.set(word, replacement);
        }
        dictionary
    }
}

impl Serialize for PronunciationDictionary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PronunciationDictionary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Form {
            Entries(Vec<PronunciationEntry>),
            // serde_json's default map is key-ordered, so the legacy object
            // form deserializes in a fixed order.
            Legacy(std::collections::BTreeMap<String, String>),
        }

        Ok(match Form::deserialize(deserializer)? {
            Form::Entries(entries) => Self { entries },
            Form::Legacy(map) => Self {
                entries: map
                    .into_iter()
                    .map(|(word, replacement)| PronunciationEntry { word, replacement })
                    .collect(),
            },
        })
    }
}
