//! End-to-end notification scenarios against the SQLite adapter
//!
//! Exercises the full wiring: lifecycle manager + sqlite directory/store +
//! recording notifier fake asserting the exact set of addressed contacts per
//! operation.

use std::collections::HashSet;
use std::sync::Arc;

use waitline_core::application::lifecycle::{CreateMeetingRequest, MeetingLifecycle};
use waitline_core::domain::{Meeting, Person, QueueId};
use waitline_core::port::id_provider::UuidProvider;
use waitline_core::port::notifier::mocks::RecordingNotifier;
use waitline_core::port::time_provider::SystemTimeProvider;
use waitline_core::port::MeetingStore;
use waitline_infra_sqlite::{create_pool, run_migrations, SqliteDirectory, SqliteMeetingStore};

const QUEUE: &str = "notification-test";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

struct TestApp {
    lifecycle: MeetingLifecycle,
    store: Arc<SqliteMeetingStore>,
    directory: Arc<SqliteDirectory>,
    notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    /// Create a meeting through the engine, then register its attendee
    /// snapshot the way the surrounding application would
    async fn create_meeting(&self, attendees: &[&str]) -> Meeting {
        let (meeting, _) = self
            .lifecycle
            .on_meeting_created(CreateMeetingRequest {
                queue: QUEUE.to_string(),
                kind: "inperson".to_string(),
            })
            .await
            .unwrap();

        let ids: Vec<String> = attendees.iter().map(|s| s.to_string()).collect();
        self.directory.set_attendees(&meeting.id, &ids).await.unwrap();
        meeting
    }

    async fn remove_meeting(&self, meeting: &Meeting) {
        self.lifecycle
            .on_meeting_removed(&QUEUE.to_string(), &meeting.id)
            .await
            .unwrap();
    }
}

async fn setup(name: &str) -> TestApp {
    init_tracing();

    let path = format!("/tmp/waitline_e2e_{}_{}.db", name, std::process::id());
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path, suffix));
    }
    let pool = create_pool(&path).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let directory = Arc::new(SqliteDirectory::new(pool.clone()));
    for (id, phone) in [
        ("foo", "+15555550000"),
        ("bar", "+15555550001"),
        ("baz", "+15555550002"),
        ("hostie", "+15555551111"),
        ("hostacular", "+15555552222"),
    ] {
        directory
            .upsert_person(&Person::with_contact(id, phone))
            .await
            .unwrap();
    }
    let queue: QueueId = QUEUE.to_string();
    directory
        .create_queue(&queue, "NotificationTest")
        .await
        .unwrap();
    directory
        .set_hosts(&queue, &["hostie".to_string(), "hostacular".to_string()])
        .await
        .unwrap();

    let store = Arc::new(SqliteMeetingStore::new(pool));
    let notifier = Arc::new(RecordingNotifier::new_succeeding());
    let lifecycle = MeetingLifecycle::new(
        store.clone(),
        directory.clone(),
        notifier.clone(),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
    );

    TestApp {
        lifecycle,
        store,
        directory,
        notifier,
    }
}

fn contacts(addresses: &[&str]) -> HashSet<String> {
    addresses.iter().map(|s| s.to_string()).collect()
}

/// The full lifecycle walk: first meeting pings hosts, second is silent,
/// removing the front promotes the next meeting and pings its attendees,
/// removing the last empties the queue silently.
#[tokio::test]
async fn test_notification_scenario_walkthrough() {
    let app = setup("walkthrough").await;

    // Create M1 {foo}: queue goes empty -> non-empty, hosts get pinged
    let m1 = app.create_meeting(&["foo"]).await;
    assert_eq!(
        app.notifier.receivers(),
        contacts(&["+15555551111", "+15555552222"])
    );
    assert_eq!(app.notifier.send_count(), 2);

    // Create M2 {bar, baz}: front unchanged, nobody is pinged
    app.notifier.reset();
    let m2 = app.create_meeting(&["bar", "baz"]).await;
    assert_eq!(app.notifier.send_count(), 0);

    // Delete M1: M2 becomes front, exactly its attendees are pinged
    app.notifier.reset();
    app.remove_meeting(&m1).await;
    assert_eq!(
        app.notifier.receivers(),
        contacts(&["+15555550001", "+15555550002"])
    );

    // Delete M2: queue is empty, nobody is pinged
    app.notifier.reset();
    app.remove_meeting(&m2).await;
    assert_eq!(app.notifier.send_count(), 0);

    let active = app
        .store
        .active_meetings(&QUEUE.to_string())
        .await
        .unwrap();
    assert!(active.is_empty());
}

#[tokio::test]
async fn test_front_removal_does_not_notify_second_in_line() {
    let app = setup("second_in_line").await;

    let m1 = app.create_meeting(&["foo"]).await;
    app.create_meeting(&["bar"]).await;
    app.create_meeting(&["baz"]).await;

    app.notifier.reset();
    app.remove_meeting(&m1).await;

    let got = app.notifier.receivers();
    assert!(got.contains("+15555550001"));
    assert!(!got.contains("+15555550002"));
    assert!(!got.contains("+15555551111"));
    assert!(!got.contains("+15555552222"));
}

#[tokio::test]
async fn test_non_front_removal_notifies_none() {
    let app = setup("non_front").await;

    app.create_meeting(&["foo"]).await;
    let m2 = app.create_meeting(&["bar", "baz"]).await;

    app.notifier.reset();
    app.remove_meeting(&m2).await;
    assert_eq!(app.notifier.send_count(), 0);
}

#[tokio::test]
async fn test_active_meetings_keep_arrival_order() {
    let app = setup("arrival_order").await;

    let m1 = app.create_meeting(&["foo"]).await;
    let m2 = app.create_meeting(&["bar"]).await;
    let m3 = app.create_meeting(&["baz"]).await;

    let active = app
        .store
        .active_meetings(&QUEUE.to_string())
        .await
        .unwrap();
    let ids: Vec<&str> = active.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec![m1.id.as_str(), m2.id.as_str(), m3.id.as_str()]);

    // Sequence numbers are strictly increasing in arrival order
    assert!(active[0].seq < active[1].seq);
    assert!(active[1].seq < active[2].seq);
}
