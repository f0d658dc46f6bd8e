//! Orchestrator lifecycle tests.
//!
//! The worker blocks on pipelines through the runtime handle, so every test
//! runs on a multi-thread runtime.

mod common;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::Semaphore;

use common::{ScriptedGateway, config, memory_store, term_url, url};
use portal_core::entities::GradeEntry;
use portal_core::{Collection, SyncKind};
use portal_sync::{Subscription, SyncError, SyncEvent, SyncOrchestrator};

type Orchestrator = SyncOrchestrator<Arc<ScriptedGateway>>;

async fn orchestrator(gateway: &Arc<ScriptedGateway>) -> Orchestrator {
    let store = Arc::new(memory_store().await);
    SyncOrchestrator::with_current_runtime(Arc::clone(gateway), store, config()).unwrap()
}

async fn next_event(sub: &mut Subscription) -> SyncEvent {
    tokio::time::timeout(Duration::from_secs(5), sub.next())
        .await
        .expect("timed out waiting for a sync event")
        .expect("notification bus closed")
}

async fn wait_for_calls(gateway: &ScriptedGateway, n: usize) {
    for _ in 0..500 {
        if gateway.calls().len() >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("gateway never reached {n} calls");
}

async fn assert_quiet(sub: &mut Subscription) {
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(sub.try_next(), None);
}

// ---------------------------------------------------------------------------
// Completion bookkeeping
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn request_all_completes_once_and_records_last_updated() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.empty_everything();
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    assert!(orchestrator.request_all().unwrap());

    assert_eq!(next_event(&mut events).await, SyncEvent::Completed);
    assert_quiet(&mut events).await;
    assert!(!orchestrator.is_active());
    assert!(orchestrator.store().last_updated().await.unwrap().is_some());

    // No terms are known, so Grades and Course fan out over nothing.
    assert_eq!(
        gateway.calls(),
        vec![
            url(SyncKind::Terms),
            url(SyncKind::Exam),
            url(SyncKind::Schedule),
            url(SyncKind::Finance),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn full_refresh_fans_out_over_terms_stored_in_the_same_cycle() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway
        .empty_everything()
        .reply(
            url(SyncKind::Terms),
            r#"[{"value":"1410","field":"2014 Odd"},{"value":"1420","field":"2014 Even"}]"#,
        )
        .reply(
            term_url(SyncKind::Grades, "1410"),
            r#"{"score":[{"kodemtk":"MATH","lam":"ASG","score":80},{"kodemtk":"MATH","lam":"FIN","score":75}]}"#,
        )
        .reply(
            term_url(SyncKind::Grades, "1420"),
            r#"{"score":[{"kodemtk":"COMP","lam":"ASG","score":90}]}"#,
        )
        .reply(
            term_url(SyncKind::Course, "1410"),
            r#"{"Courses":[{"CLASS_NBR":"100","CRSE_CODE":"MATH"}]}"#,
        )
        .reply(
            term_url(SyncKind::Course, "1420"),
            r#"{"Courses":[{"CLASS_NBR":"200","CRSE_CODE":"COMP"}]}"#,
        );
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    assert!(orchestrator.request_all().unwrap());

    assert_eq!(next_event(&mut events).await, SyncEvent::Completed);
    assert_quiet(&mut events).await;
    assert_eq!(
        gateway.calls(),
        vec![
            url(SyncKind::Terms),
            url(SyncKind::Exam),
            url(SyncKind::Schedule),
            url(SyncKind::Finance),
            term_url(SyncKind::Grades, "1410"),
            term_url(SyncKind::Grades, "1420"),
            term_url(SyncKind::Course, "1410"),
            term_url(SyncKind::Course, "1420"),
        ]
    );

    let store = orchestrator.store();
    let grades: Vec<GradeEntry> = store.read_all().await.unwrap();
    assert_eq!(grades.iter().filter(|g| g.term == "1410").count(), 2);
    assert_eq!(grades.iter().filter(|g| g.term == "1420").count(), 1);
    assert_eq!(store.count(Collection::Courses).await.unwrap(), 2);
    assert!(store.last_updated().await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn request_all_while_active_is_a_no_op() {
    let gate = Arc::new(Semaphore::new(0));
    let gateway = Arc::new(ScriptedGateway::gated(Arc::clone(&gate)));
    gateway.empty_everything();
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    assert!(orchestrator.request_all().unwrap());
    wait_for_calls(&gateway, 1).await;
    assert!(orchestrator.is_active());

    assert!(!orchestrator.request_all().unwrap());
    gate.add_permits(64);

    assert_eq!(next_event(&mut events).await, SyncEvent::Completed);
    assert_quiet(&mut events).await;
    assert_eq!(gateway.calls().len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn every_cycle_gets_its_own_completion() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.reply(url(SyncKind::Terms), r#"[{"value":"1410","field":"2014 Odd"}]"#);
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    orchestrator.request_sync(SyncKind::Terms).unwrap();
    assert_eq!(next_event(&mut events).await, SyncEvent::Completed);
    orchestrator.request_sync(SyncKind::Terms).unwrap();
    assert_eq!(next_event(&mut events).await, SyncEvent::Completed);

    assert_eq!(gateway.calls().len(), 2);
    assert_eq!(
        orchestrator.store().count(Collection::Terms).await.unwrap(),
        1
    );
}

// ---------------------------------------------------------------------------
// Ordering and serialization
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn requests_queued_while_draining_run_in_fifo_order() {
    let gate = Arc::new(Semaphore::new(0));
    let gateway = Arc::new(ScriptedGateway::gated(Arc::clone(&gate)));
    gateway.empty_everything();
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    orchestrator.request_sync(SyncKind::Schedule).unwrap();
    wait_for_calls(&gateway, 1).await;
    orchestrator.request_sync(SyncKind::Finance).unwrap();
    orchestrator.request_sync(SyncKind::Exam).unwrap();
    gate.add_permits(64);

    assert_eq!(next_event(&mut events).await, SyncEvent::Completed);
    assert_quiet(&mut events).await;
    assert_eq!(
        gateway.calls(),
        vec![
            url(SyncKind::Schedule),
            url(SyncKind::Finance),
            url(SyncKind::Exam),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn batch_request_runs_as_one_cycle() {
    let gateway = Arc::new(ScriptedGateway::with_delay(Duration::from_millis(20)));
    gateway.reply(
        url(SyncKind::Schedule),
        r#"[{"START_DT":"2016-03-01","CRSE_CODE":"MATH"}]"#,
    );
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    orchestrator
        .request_many(&[SyncKind::Account, SyncKind::Schedule])
        .unwrap();

    assert_eq!(next_event(&mut events).await, SyncEvent::Completed);
    assert_eq!(
        orchestrator.store().count(Collection::Schedules).await.unwrap(),
        1
    );
    assert_quiet(&mut events).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn wait_idle_outlasts_back_to_back_cycles() {
    let gateway = Arc::new(ScriptedGateway::with_delay(Duration::from_millis(50)));
    gateway.reply(
        url(SyncKind::Schedule),
        r#"[{"START_DT":"2016-03-01","CRSE_CODE":"MATH"}]"#,
    );
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    orchestrator.request_sync(SyncKind::Account).unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    orchestrator.request_sync(SyncKind::Schedule).unwrap();

    let failed = tokio::time::timeout(Duration::from_secs(5), orchestrator.wait_idle(&mut events))
        .await
        .expect("timed out waiting for idle");

    assert_eq!(failed, Some(false));
    assert!(!orchestrator.is_active());
    assert_eq!(
        orchestrator.store().count(Collection::Schedules).await.unwrap(),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn wait_idle_reports_failure() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.fail(url(SyncKind::Exam), 502);
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    orchestrator.request_sync(SyncKind::Exam).unwrap();

    let failed = tokio::time::timeout(Duration::from_secs(5), orchestrator.wait_idle(&mut events))
        .await
        .expect("timed out waiting for idle");
    assert_eq!(failed, Some(true));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_callers_never_overlap_pipelines() {
    let gateway = Arc::new(ScriptedGateway::with_delay(Duration::from_millis(50)));
    gateway
        .reply(
            url(SyncKind::Schedule),
            r#"[{"START_DT":"2016-03-01","CRSE_CODE":"MATH"}]"#,
        )
        .reply(
            url(SyncKind::Exam),
            r#"[{"ExamDate":"2016-06-01","CRSE_CODE":"MATH"}]"#,
        );
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    std::thread::scope(|scope| {
        for kind in [SyncKind::Schedule, SyncKind::Exam] {
            let orchestrator = orchestrator.clone();
            scope.spawn(move || orchestrator.request_sync(kind).unwrap());
        }
    });

    while gateway.calls().len() < 2 || orchestrator.is_active() {
        assert_eq!(next_event(&mut events).await, SyncEvent::Completed);
    }

    assert_eq!(gateway.max_in_flight(), 1);
    let store = orchestrator.store();
    assert_eq!(store.count(Collection::Schedules).await.unwrap(), 1);
    assert_eq!(store.count(Collection::Exams).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Failure
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failure_discards_queue_and_keeps_last_updated() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.empty_everything();
    gateway.fail(url(SyncKind::Terms), 500);
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    assert!(orchestrator.request_all().unwrap());

    assert_eq!(next_event(&mut events).await, SyncEvent::Failed);
    assert_eq!(next_event(&mut events).await, SyncEvent::Completed);
    assert_quiet(&mut events).await;

    assert_eq!(gateway.calls(), vec![url(SyncKind::Terms)]);
    assert!(!orchestrator.is_active());
    assert_eq!(orchestrator.store().last_updated().await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failed_cycle_does_not_block_the_next_one() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.reply(url(SyncKind::Exam), "not json");
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    orchestrator.request_sync(SyncKind::Exam).unwrap();
    assert_eq!(next_event(&mut events).await, SyncEvent::Failed);
    assert_eq!(next_event(&mut events).await, SyncEvent::Completed);

    gateway.reply(url(SyncKind::Exam), "[]");
    orchestrator.request_sync(SyncKind::Exam).unwrap();
    assert_eq!(next_event(&mut events).await, SyncEvent::Completed);
    assert!(orchestrator.store().last_updated().await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn account_sync_completes_without_fetching() {
    let gateway = Arc::new(ScriptedGateway::new());
    let orchestrator = orchestrator(&gateway).await;
    let mut events = orchestrator.subscribe();

    orchestrator.request_sync(SyncKind::Account).unwrap();

    assert_eq!(next_event(&mut events).await, SyncEvent::Completed);
    assert!(gateway.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn current_thread_runtime_is_rejected() {
    let gateway = Arc::new(ScriptedGateway::new());
    let store = Arc::new(memory_store().await);

    let result = SyncOrchestrator::with_current_runtime(gateway, store, config());

    assert!(matches!(result, Err(SyncError::NoRuntime)));
}
