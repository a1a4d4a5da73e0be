use crate::helpers::{start_mock_provider, test_settings, TestContext};
use pretty_assertions::assert_eq;
use speechsynth::error::AppError;
use speechsynth::infrastructure::host::CancelToken;

#[tokio::test]
async fn it_should_complete_immediately_on_an_empty_folder() {
    let provider = start_mock_provider().await;
    let mut settings = test_settings(&provider.endpoint());
    settings.batch_processing_enabled = true;
    let ctx = TestContext::new(settings, None).await;
    ctx.media_storage.add_folder("notes");

    let report = ctx
        .app
        .run_batch("notes", &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(report.total, 0);
    assert_eq!(report.succeeded, 0);
    assert_eq!(provider.request_count(), 0);
    assert!(ctx.notifier.contains("Batch complete: 0/0 succeeded"));
}

#[tokio::test]
async fn it_should_continue_past_a_failing_item() {
    let provider = start_mock_provider().await;
    let mut settings = test_settings(&provider.endpoint());
    settings.batch_processing_enabled = true;
    let ctx = TestContext::new(settings, None).await;

    ctx.media_storage.add_text("notes", "one.md", "first note");
    ctx.media_storage
        .add_text("notes", "two.md", "second note [FAIL]");
    ctx.media_storage.add_text("notes", "three.md", "third note");

    let report = ctx
        .app
        .run_batch("notes", &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].item, "notes/two.md");
    // All three items reached the provider despite the middle failure.
    assert_eq!(provider.request_count(), 3);
    assert!(ctx.notifier.contains("Batch complete: 2/3 succeeded"));
}

#[tokio::test]
async fn it_should_process_items_in_stable_order() {
    let provider = start_mock_provider().await;
    let mut settings = test_settings(&provider.endpoint());
    settings.batch_processing_enabled = true;
    let ctx = TestContext::new(settings, None).await;

    ctx.media_storage.add_text("notes", "c.md", "gamma");
    ctx.media_storage.add_text("notes", "a.md", "alpha");
    ctx.media_storage.add_text("notes", "b.md", "beta");

    ctx.app
        .run_batch("notes", &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(
        provider.inputs(),
        vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()]
    );
}

#[tokio::test]
async fn it_should_refuse_when_batch_mode_is_disabled() {
    let provider = start_mock_provider().await;
    let settings = test_settings(&provider.endpoint());
    let ctx = TestContext::new(settings, None).await;
    ctx.media_storage.add_text("notes", "one.md", "first note");

    let err = ctx
        .app
        .run_batch("notes", &CancelToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Configuration(_)));
    assert_eq!(provider.request_count(), 0);
    assert!(ctx.notifier.contains("Batch failed"));
}

#[tokio::test]
async fn it_should_fail_on_a_missing_folder() {
    let provider = start_mock_provider().await;
    let mut settings = test_settings(&provider.endpoint());
    settings.batch_processing_enabled = true;
    let ctx = TestContext::new(settings, None).await;

    let err = ctx
        .app
        .run_batch("nowhere", &CancelToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Configuration(_)));
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn it_should_stop_between_items_when_cancelled() {
    let provider = start_mock_provider().await;
    let mut settings = test_settings(&provider.endpoint());
    settings.batch_processing_enabled = true;
    let ctx = TestContext::new(settings, None).await;
    ctx.media_storage.add_text("notes", "one.md", "first note");

    let cancel = CancelToken::new();
    cancel.cancel();

    let err = ctx.app.run_batch("notes", &cancel).await.unwrap_err();

    assert!(matches!(err, AppError::Cancelled));
    assert_eq!(provider.request_count(), 0);
}
