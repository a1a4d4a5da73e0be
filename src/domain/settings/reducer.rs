//! Settings mutation as discrete field-changed events.
//!
//! The settings form emits one event per widget change; `apply` is the
//! single place where ranges are clamped and record invariants are kept,
//! so presentation code never rewrites the shared record directly.

use super::model::{Settings, PITCH_RANGE, SPEED_RANGE, VOLUME_RANGE};

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    ApiKeyChanged(String),
    ApiUrlChanged(String),
    ModelChanged(String),
    VoiceChanged(String),
    LanguageChanged(String),
    SpeedChanged(f32),
    PitchChanged(f32),
    VolumeChanged(f32),
    SendSpeedToggled(bool),
    SendPitchToggled(bool),
    SaveAudioFileToggled(bool),
    SavePathChanged(String),
    PlaybackToggled(bool),
    CreateTextNoteToggled(bool),
    TextNotePathChanged(String),
    PronunciationSet { word: String, replacement: String },
    PronunciationRemoved(String),
    BatchProcessingToggled(bool),
    ExperimentalFeaturesToggled(bool),
    AdvancedSettingsToggled(bool),
    DebugModeToggled(bool),
    RequestTimeoutChanged(u64),
}

/// Apply one field change to the record.
pub fn apply(settings: &mut Settings, event: SettingsEvent) {
    match event {
        SettingsEvent::ApiKeyChanged(value) => settings.api_key = value,
        SettingsEvent::ApiUrlChanged(value) => settings.api_url = value,
        SettingsEvent::ModelChanged(value) => settings.model = value,
        SettingsEvent::VoiceChanged(value) => settings.voice = value,
        SettingsEvent::LanguageChanged(value) => settings.language = value,
        SettingsEvent::SpeedChanged(value) => {
            settings.speed = value.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
        }
        SettingsEvent::PitchChanged(value) => {
            settings.pitch = value.clamp(*PITCH_RANGE.start(), *PITCH_RANGE.end());
        }
        SettingsEvent::VolumeChanged(value) => {
            settings.volume = value.clamp(*VOLUME_RANGE.start(), *VOLUME_RANGE.end());
        }
        SettingsEvent::SendSpeedToggled(value) => settings.send_speed = value,
        SettingsEvent::SendPitchToggled(value) => settings.send_pitch = value,
        SettingsEvent::SaveAudioFileToggled(value) => {
            settings.save_audio_file = value;
            // Invariant: a cleared toggle leaves no stale path behind.
            if !value {
                settings.save_audio_file_path.clear();
            }
        }
        SettingsEvent::SavePathChanged(value) => settings.save_audio_file_path = value,
        SettingsEvent::PlaybackToggled(value) => settings.playback_enabled = value,
        SettingsEvent::CreateTextNoteToggled(value) => {
            settings.create_text_note = value;
            if !value {
                settings.create_text_note_path.clear();
            }
        }
        SettingsEvent::TextNotePathChanged(value) => settings.create_text_note_path = value,
        SettingsEvent::PronunciationSet { word, replacement } => {
            settings.pronunciation_dictionary.set(word, replacement);
        }
        SettingsEvent::PronunciationRemoved(word) => {
            settings.pronunciation_dictionary.remove(&word);
        }
        SettingsEvent::BatchProcessingToggled(value) => settings.batch_processing_enabled = value,
        SettingsEvent::ExperimentalFeaturesToggled(value) => {
            settings.experimental_features_enabled = value;
        }
        SettingsEvent::AdvancedSettingsToggled(value) => {
            settings.advanced_settings_visible = value;
        }
        SettingsEvent::DebugModeToggled(value) => settings.debug_mode = value,
        SettingsEvent::RequestTimeoutChanged(value) => settings.request_timeout_secs = value,
    }
}
