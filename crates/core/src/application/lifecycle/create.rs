// Meeting Creation Use Case

use crate::application::lifecycle::constants::{CONFLICT_RETRY_DELAY, MAX_CONFLICT_RETRIES};
use crate::application::notify::{self, NotifyOutcome};
use crate::domain::{front_meeting, Meeting, MeetingKind, QueueId};
use crate::error::{AppError, Result};
use crate::port::{
    Directory, IdProvider, Notifier, QueueTransaction, TimeProvider, Transaction,
    TransactionalMeetingStore,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Meeting creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMeetingRequest {
    pub queue: QueueId,
    pub kind: String,
}

/// Execute meeting creation (with a queue-scoped transaction for atomicity)
///
/// Inserts the meeting into the queue's active set and, when it became the
/// front meeting (the queue was empty), notifies the queue's hosts. The
/// insertion commits regardless of notification outcome.
///
/// # Arguments
///
/// * `store` - Transactional meeting store
/// * `directory` - Host/attendee lookup
/// * `notifier` - Notification transport
/// * `id_provider` - ID generator (injected for determinism)
/// * `time_provider` - Time provider (injected for determinism)
/// * `req` - Creation request
pub async fn execute(
    store: &dyn TransactionalMeetingStore,
    directory: &dyn Directory,
    notifier: Arc<dyn Notifier>,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    req: CreateMeetingRequest,
) -> Result<(Meeting, NotifyOutcome)> {
    validate_request(&req)?;

    // Retry the transactional section on store conflicts; each attempt
    // recomputes the before/after pair from a consistent snapshot
    let mut attempt = 0;
    let (meeting, became_front) = loop {
        match try_create(store, id_provider, time_provider, &req).await {
            Ok(result) => break result,
            Err(AppError::Conflict(msg)) if attempt < MAX_CONFLICT_RETRIES => {
                attempt += 1;
                warn!(
                    queue = %req.queue,
                    attempt = attempt,
                    "Transaction conflict on create, retrying: {}",
                    msg
                );
                sleep(CONFLICT_RETRY_DELAY).await;
            }
            Err(e) => return Err(e),
        }
    };

    if !became_front {
        debug!(
            queue = %req.queue,
            meeting_id = %meeting.id,
            "Queue already had a front meeting, no notification"
        );
        return Ok((meeting, NotifyOutcome::default()));
    }

    // The queue went empty -> non-empty: tell the hosts someone is waiting.
    // Dispatch runs after commit so the transport never holds the queue lock.
    let hosts = directory.hosts_of(&req.queue).await?;
    let queue_name = directory.queue_name(&req.queue).await?;

    info!(
        queue = %req.queue,
        meeting_id = %meeting.id,
        hosts = hosts.len(),
        "Meeting became front, notifying hosts"
    );

    let outcome = notify::dispatch(notifier, &hosts, &host_alert(&queue_name)).await;
    Ok((meeting, outcome))
}

async fn try_create(
    store: &dyn TransactionalMeetingStore,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    req: &CreateMeetingRequest,
) -> Result<(Meeting, bool)> {
    let mut tx = store.begin_transaction(&req.queue).await?;

    // State immediately prior to insertion
    let active = tx.active_meetings().await?;
    let front_before = front_meeting(&active).map(|m| m.id.clone());

    let seq = tx.next_seq().await?;
    let meeting = Meeting::new(
        id_provider.generate_id(),
        req.queue.clone(),
        MeetingKind::new(req.kind.clone()),
        time_provider.now_millis(),
        seq,
    );
    tx.insert(&meeting).await?;

    // State including the new meeting
    let mut after = active;
    after.push(meeting.clone());
    let front_after = front_meeting(&after).map(|m| m.id.clone());

    tx.commit().await?;

    // Creation appends a later-or-equal key, so the new meeting is front
    // iff the queue was empty before
    let became_front = front_after.as_deref() == Some(meeting.id.as_str());
    debug!(
        queue = %req.queue,
        meeting_id = %meeting.id,
        seq = meeting.seq,
        front_before = ?front_before,
        became_front = became_front,
        "Meeting inserted"
    );

    Ok((meeting, became_front))
}

fn validate_request(req: &CreateMeetingRequest) -> Result<()> {
    if req.queue.is_empty() {
        return Err(AppError::Validation("Queue id must not be empty".to_string()));
    }
    if req.kind.is_empty() {
        return Err(AppError::Validation(
            "Meeting kind must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn host_alert(queue_name: &str) -> String {
    format!("A new attendee is waiting in \"{}\".", queue_name)
}
