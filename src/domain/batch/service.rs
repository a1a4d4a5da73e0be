use crate::domain::dispatch::OutputDispatcher;
use crate::domain::settings::Settings;
use crate::domain::synthesis::SynthesisService;
use crate::error::{AppError, AppResult};
use crate::infrastructure::host::{CancelToken, MediaStorage, NotificationSink};
use std::sync::Arc;

/// Aggregate result of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: usize,
    pub total: usize,
    pub failures: Vec<BatchFailure>,
}

#[derive(Debug)]
pub struct BatchFailure {
    pub item: String,
    pub reason: String,
}

/// Runs the full pipeline over every text-bearing item under a folder,
/// one item at a time in a stable order. A single item's failure is
/// reported and recorded, never propagated to abort the batch.
pub struct BatchRunner {
    storage: Arc<dyn MediaStorage>,
    synthesis: Arc<SynthesisService>,
    dispatcher: Arc<OutputDispatcher>,
    notifier: Arc<dyn NotificationSink>,
}

impl BatchRunner {
    pub fn new(
        storage: Arc<dyn MediaStorage>,
        synthesis: Arc<SynthesisService>,
        dispatcher: Arc<OutputDispatcher>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            storage,
            synthesis,
            dispatcher,
            notifier,
        }
    }

    pub async fn run(
        &self,
        folder: &str,
        settings: &Settings,
        cancel: &CancelToken,
    ) -> AppResult<BatchReport> {
        if !settings.batch_processing_enabled {
            return Err(AppError::Configuration(
                "batch processing is disabled in settings".to_string(),
            ));
        }

        let mut items = self.storage.list_text_items(folder).await?;
        items.sort();
        let total = items.len();

        let mut report = BatchReport {
            total,
            ..BatchReport::default()
        };

        if total == 0 {
            tracing::info!(folder = %folder, "batch folder contains no text items");
            self.notifier.notify("Batch complete: 0/0 succeeded");
            return Ok(report);
        }

        tracing::info!(folder = %folder, item_count = total, "Starting batch run");

        for (index, item) in items.iter().enumerate() {
            cancel.check()?;

            match self.process_item(item, settings, cancel).await {
                Ok(()) => {
                    report.succeeded += 1;
                    self.notifier
                        .notify(&format!("({}/{}) {}: done", index + 1, total, item));
                }
                Err(AppError::Cancelled) => return Err(AppError::Cancelled),
                Err(e) => {
                    tracing::error!(item = %item, error = %e, "batch item failed");
                    self.notifier
                        .notify(&format!("({}/{}) {}: {}", index + 1, total, item, e));
                    report.failures.push(BatchFailure {
                        item: item.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            succeeded = report.succeeded,
            total = total,
            "Batch run completed"
        );
        self.notifier.notify(&format!(
            "Batch complete: {}/{} succeeded",
            report.succeeded, total
        ));

        Ok(report)
    }

    async fn process_item(
        &self,
        item: &str,
        settings: &Settings,
        cancel: &CancelToken,
    ) -> AppResult<()> {
        let text = self.storage.read_text(item).await?;
        let payload = self.synthesis.synthesize(&text, settings, cancel).await?;
        self.dispatcher
            .dispatch(&payload, &text, settings, cancel)
            .await
            .into_result()
    }
}
