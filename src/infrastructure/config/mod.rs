use std::env;
use std::path::PathBuf;

/// Environment configuration for the CLI host. The settings record itself
/// lives in the settings file; this only covers where that file is, how to
/// log, and an optional API key override for ad-hoc use.
#[derive(Debug, Clone)]
pub struct Config {
    pub settings_path: PathBuf,
    pub log_format: LogFormat,
    pub api_key_override: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            settings_path: env::var("SPEECHSYNTH_SETTINGS")
                .unwrap_or_else(|_| "speechsynth.json".to_string())
                .into(),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            api_key_override: env::var("SPEECHSYNTH_API_KEY").ok(),
        };

        Ok(config)
    }
}
