pub mod audio;
pub mod config;
pub mod host;
pub mod providers;
pub mod storage;
