use clap::{Parser, Subcommand};
use speechsynth::infrastructure::audio::RodioOutput;
use speechsynth::infrastructure::config::{Config, LogFormat};
use speechsynth::infrastructure::host::{CancelToken, NotificationSink, SelectionSource};
use speechsynth::infrastructure::providers::OpenAiSpeechProvider;
use speechsynth::infrastructure::storage::{FsMediaStorage, FsSettingsStorage};
use speechsynth::SpeechSynth;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "speechsynth", about = "Text-to-speech pipeline over a remote synthesis API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synthesize one piece of text (argument, or stdin when omitted)
    Speak { text: Option<String> },
    /// Run every text file under a folder through the pipeline
    Batch { folder: String },
}

/// Status messages go straight to stderr; log lines stay on the tracing
/// subscriber.
struct StderrNotifier;

impl NotificationSink for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// The CLI has no editor selection; `speak` passes text explicitly.
struct NoSelection;

impl SelectionSource for NoSelection {
    fn current_selection(&self) -> Option<String> {
        None
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_logging(&config);

    let cli = Cli::parse();

    tracing::info!(
        settings_path = %config.settings_path.display(),
        "Starting speechsynth"
    );

    let settings_storage = Arc::new(FsSettingsStorage::new(config.settings_path.clone()));
    let media_storage = Arc::new(FsMediaStorage::new(std::env::current_dir()?));
    let provider = Arc::new(OpenAiSpeechProvider::new());
    let audio = Arc::new(RodioOutput::new());
    let notifier = Arc::new(StderrNotifier);

    let app = SpeechSynth::load(
        settings_storage,
        media_storage,
        provider,
        audio,
        notifier,
        Arc::new(NoSelection),
    )
    .await;

    if let Some(api_key) = config.api_key_override {
        app.set_session_api_key(api_key);
    }

    // Ctrl-C flips the cancellation token; the pipeline checks it at each
    // suspend point, so a long batch stops between items.
    let cancel = CancelToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("cancellation requested");
            signal_token.cancel();
        }
    });

    let exit = match cli.command {
        Command::Speak { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    tokio::io::stdin().read_to_string(&mut buffer).await?;
                    buffer
                }
            };
            match app.speak(&text, &cancel).await {
                Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
                Ok(_) | Err(_) => ExitCode::FAILURE,
            }
        }
        Command::Batch { folder } => match app.run_batch(&folder, &cancel).await {
            Ok(report) if report.failures.is_empty() => ExitCode::SUCCESS,
            Ok(_) | Err(_) => ExitCode::FAILURE,
        },
    };

    Ok(exit)
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "speechsynth=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "speechsynth=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
