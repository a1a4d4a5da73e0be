pub mod app;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use app::SpeechSynth;
pub use error::{AppError, AppResult};
