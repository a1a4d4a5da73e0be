pub mod openai;
pub mod speech_provider;

pub use openai::OpenAiSpeechProvider;
pub use speech_provider::SpeechProvider;
