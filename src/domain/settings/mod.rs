pub mod model;
pub mod reducer;
pub mod store;

pub use model::{PronunciationDictionary, PronunciationEntry, Settings, DEFAULT_API_URL};
pub use reducer::SettingsEvent;
pub use store::SettingsStore;
