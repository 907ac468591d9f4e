mod common;

use common::*;
use intake_application::{IntakeApp, WizardController};
use intake_application::StoreEvent;
use intake_application::wizard::SummaryOutcome;
use intake_core::config::AppConfig;
use intake_core::report::ReportExporter;
use intake_core::round::{RoundData, RoundKind};
use intake_core::session::{DownstreamPolicy, SessionRepository, SessionStatus, WizardStep};
use intake_infrastructure::{InMemorySessionRepository, JsonSessionRepository, MarkdownReportExporter};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn test_deleted_session_is_not_resurrected_by_summary() {
    let repo = Arc::new(InMemorySessionRepository::new());
    let gated = Arc::new(GatedGenerator::new());
    let started = Arc::clone(&gated.started);
    let release = Arc::clone(&gated.release);

    // Rounds 1 and 2 wait on the gate too; let them through as they come
    let app = app_with(gated, repo.clone()).await;
    let opener = tokio::spawn({
        let release = Arc::clone(&release);
        let started = Arc::clone(&started);
        async move {
            for _ in 0..2 {
                started.notified().await;
                release.notify_one();
            }
        }
    });
    let wizard = advance_to_round3(&app).await;
    opener.await.unwrap();

    let completion = wizard
        .complete_round3(round3_payload(None, vec!["https://example.com/a.jpg".into()]))
        .await
        .unwrap();
    let id = completion.session.id.clone();

    // The summary request is now outstanding
    started.notified().await;
    assert!(app.store().delete(&id).await.unwrap());
    release.notify_one();

    let outcome = completion.summary_job.await.unwrap();
    assert!(matches!(
        outcome,
        SummaryOutcome::Cancelled | SummaryOutcome::Discarded
    ));
    assert!(app.store().get(&id).await.is_none());
    assert!(repo.load_all().await.unwrap().is_empty());
    assert!(!repo.raw().unwrap().contains(&id));
}

/// Drives a gated app to round 3, letting the two option requests through.
async fn gated_round3(app: &IntakeApp, gated: &GatedGenerator) -> WizardController {
    let opener = tokio::spawn({
        let release = Arc::clone(&gated.release);
        let started = Arc::clone(&gated.started);
        async move {
            for _ in 0..2 {
                started.notified().await;
                release.notify_one();
            }
        }
    });
    let wizard = advance_to_round3(app).await;
    opener.await.unwrap();
    wizard
}

#[tokio::test]
async fn test_reopened_session_does_not_receive_stale_summary() {
    let gated = Arc::new(GatedGenerator::new());
    let mut config = AppConfig::default();
    config.wizard.downstream_policy = DownstreamPolicy::Invalidate;
    let app = app_with_config(
        config,
        gated.clone(),
        Arc::new(InMemorySessionRepository::new()),
        None,
    )
    .await;
    let wizard = gated_round3(&app, &gated).await;

    let completion = wizard
        .complete_round3(round3_payload(None, vec!["https://example.com/a.jpg".into()]))
        .await
        .unwrap();
    gated.started.notified().await;

    // Changing round 1 reopens the session while the summary is pending
    wizard.navigate_to(WizardStep::Round1).await.unwrap();
    let mut edited = wizard.session().await.unwrap().round1;
    edited.comment = "换一个方向".to_string();
    wizard.complete_round1(edited).await.unwrap();
    gated.release.notify_one();

    assert_eq!(completion.summary_job.await.unwrap(), SummaryOutcome::Cancelled);
    let session = wizard.session().await.unwrap();
    assert_eq!(session.status, SessionStatus::InProgress);
    assert!(session.round3.generated_images.is_empty());
    assert_eq!(session.ai_summary, None);
}

#[tokio::test]
async fn test_step_edit_and_summary_both_survive() {
    let gated = Arc::new(GatedGenerator::new());
    let app = app_with(gated.clone(), Arc::new(InMemorySessionRepository::new())).await;
    let wizard = gated_round3(&app, &gated).await;

    let completion = wizard
        .complete_round3(round3_payload(None, vec!["https://example.com/a.jpg".into()]))
        .await
        .unwrap();
    gated.started.notified().await;

    wizard.navigate_to(WizardStep::Round1).await.unwrap();
    let mut edited = wizard.session().await.unwrap().round1;
    edited.comment = "补充说明".to_string();
    wizard.complete_round1(edited).await.unwrap();
    gated.release.notify_one();
    assert_eq!(completion.summary_job.await.unwrap(), SummaryOutcome::Attached);

    // Completing a step again after the summary landed keeps it
    wizard.navigate_to(WizardStep::Round2).await.unwrap();
    let round2 = wizard.session().await.unwrap().round2;
    wizard.complete_round2(round2).await.unwrap();

    let session = wizard.session().await.unwrap();
    assert_eq!(session.round1.comment, "补充说明");
    assert_eq!(session.ai_summary.as_deref(), Some(SCRIPTED_SUMMARY));
    assert_eq!(session.status, SessionStatus::Completed);
}

#[tokio::test]
async fn test_corrupt_storage_file_is_replaced_on_next_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{corrupted").unwrap();

    let app = IntakeApp::assemble(
        AppConfig::default(),
        Arc::new(JsonSessionRepository::new(path.clone())),
        Arc::new(FailingGenerator),
        None,
    )
    .await;
    assert!(app.store().list().await.is_empty());
    let created = app.store().create().await.unwrap();

    let reopened = IntakeApp::assemble(
        AppConfig::default(),
        Arc::new(JsonSessionRepository::new(path)),
        Arc::new(FailingGenerator),
        None,
    )
    .await;
    let ids: Vec<_> = reopened.store().list().await.into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![created.id]);
}

#[tokio::test]
async fn test_second_generation_for_same_step_is_busy() {
    let gated = Arc::new(GatedGenerator::new());
    let started = Arc::clone(&gated.started);
    let release = Arc::clone(&gated.release);
    let app = app_with(gated, Arc::new(InMemorySessionRepository::new())).await;

    let wizard = Arc::new(app.new_wizard().await.unwrap());
    wizard.complete_setup(complete_persona()).await.unwrap();

    let first = tokio::spawn({
        let wizard = Arc::clone(&wizard);
        async move {
            wizard
                .generate_options(RoundKind::Functional, RoundData::default(), vec!["安全".into()])
                .await
        }
    });
    started.notified().await;

    let err = wizard
        .generate_options(RoundKind::Functional, RoundData::default(), vec!["安全".into()])
        .await
        .unwrap_err();
    assert!(err.is_busy());

    release.notify_one();
    let draft = first.await.unwrap().unwrap();
    assert_eq!(draft.generated_configs.len(), 6);
}

#[tokio::test]
async fn test_json_storage_round_trip_is_stable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    let repo: Arc<dyn SessionRepository> = Arc::new(JsonSessionRepository::new(path.clone()));
    let generator = Arc::new(ScriptedGenerator::new(vec![png_data_url(64, 36)]));
    let app = IntakeApp::assemble(AppConfig::default(), repo.clone(), generator, None).await;

    let wizard = advance_to_round3(&app).await;
    app.new_wizard().await.unwrap();
    let images = wizard.generate_concepts("未来感", None).await.unwrap();
    wizard
        .complete_round3(round3_payload(None, images))
        .await
        .unwrap()
        .summary_job
        .await
        .unwrap();

    let before = std::fs::read_to_string(&path).unwrap();
    let loaded = repo.load_all().await.unwrap();
    assert_eq!(loaded.len(), 2);
    repo.save_all(&loaded).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);

    // A second process sees the same collection, most recent first
    let reopened = IntakeApp::assemble(
        AppConfig::default(),
        Arc::new(JsonSessionRepository::new(path)),
        Arc::new(FailingGenerator),
        None,
    )
    .await;
    let ids: Vec<_> = reopened.store().list().await.into_iter().map(|s| s.id).collect();
    let expected: Vec<_> = loaded.into_iter().map(|s| s.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_store_notifies_observers_through_wizard() {
    let app = app_with(
        Arc::new(ScriptedGenerator::new(Vec::new())),
        Arc::new(InMemorySessionRepository::new()),
    )
    .await;
    let mut events = app.store().subscribe();

    let wizard = app.new_wizard().await.unwrap();
    wizard.complete_setup(complete_persona()).await.unwrap();

    let id = wizard.session_id().to_string();
    assert_eq!(events.recv().await.unwrap(), StoreEvent::Created(id.clone()));
    assert_eq!(events.recv().await.unwrap(), StoreEvent::Updated(id));
}

#[tokio::test]
async fn test_export_writes_report_for_completed_session() {
    let dir = TempDir::new().unwrap();
    let exporter: Arc<dyn ReportExporter> =
        Arc::new(MarkdownReportExporter::new(dir.path().to_path_buf()));
    let app = app_with_config(
        AppConfig::default(),
        Arc::new(ScriptedGenerator::new(vec![png_data_url(48, 27)])),
        Arc::new(InMemorySessionRepository::new()),
        Some(exporter),
    )
    .await;

    let wizard = advance_to_round3(&app).await;
    let images = wizard.generate_concepts("清新", None).await.unwrap();
    let completion = wizard.complete_round3(round3_payload(None, images)).await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), completion.summary_job)
        .await
        .unwrap()
        .unwrap();

    let exported = wizard.export_report().await.unwrap();
    let body = std::fs::read_to_string(&exported.path).unwrap();
    assert!(body.contains(SCRIPTED_SUMMARY));
    assert!(body.contains("选项0"));
    // The data-URL concept image is written beside the report
    let short_id = completion.session.short_id();
    assert!(dir.path().join(format!("intake_report_{}.jpg", short_id)).exists());
}

#[tokio::test]
async fn test_export_without_exporter_fails() {
    let app = app_with(
        Arc::new(ScriptedGenerator::new(Vec::new())),
        Arc::new(InMemorySessionRepository::new()),
    )
    .await;
    let wizard = app.new_wizard().await.unwrap();
    assert!(wizard.export_report().await.is_err());
}
