pub mod batch;
pub mod dispatch;
pub mod settings;
pub mod synthesis;
