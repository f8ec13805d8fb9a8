// Meeting Removal Use Case

use crate::application::lifecycle::constants::{CONFLICT_RETRY_DELAY, MAX_CONFLICT_RETRIES};
use crate::application::notify::{self, NotifyOutcome};
use crate::domain::{front_meeting, DomainError, Meeting, MeetingId, QueueId};
use crate::error::{AppError, Result};
use crate::port::{
    Directory, Notifier, QueueTransaction, Transaction, TransactionalMeetingStore,
};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Execute meeting removal (with a queue-scoped transaction for atomicity)
///
/// Removes the meeting from the queue's active set. When the removed meeting
/// was the front and another meeting remains, the new front meeting's
/// attendees are told they are next. The removal commits regardless of
/// notification outcome.
///
/// # Arguments
///
/// * `store` - Transactional meeting store
/// * `directory` - Host/attendee lookup
/// * `notifier` - Notification transport
/// * `queue` - Queue owning the meeting
/// * `meeting_id` - Meeting to remove
pub async fn execute(
    store: &dyn TransactionalMeetingStore,
    directory: &dyn Directory,
    notifier: Arc<dyn Notifier>,
    queue: &QueueId,
    meeting_id: &MeetingId,
) -> Result<NotifyOutcome> {
    let mut attempt = 0;
    let new_front = loop {
        match try_remove(store, queue, meeting_id).await {
            Ok(result) => break result,
            Err(AppError::Conflict(msg)) if attempt < MAX_CONFLICT_RETRIES => {
                attempt += 1;
                warn!(
                    queue = %queue,
                    meeting_id = %meeting_id,
                    attempt = attempt,
                    "Transaction conflict on remove, retrying: {}",
                    msg
                );
                sleep(CONFLICT_RETRY_DELAY).await;
            }
            Err(e) => return Err(e),
        }
    };

    let next = match new_front {
        Some(next) => next,
        None => {
            debug!(
                queue = %queue,
                meeting_id = %meeting_id,
                "Removal caused no front transition, no notification"
            );
            return Ok(NotifyOutcome::default());
        }
    };

    // The front meeting changed hands: tell the new front's attendees.
    // Audience captured during the transaction; dispatch runs after commit.
    let attendees = directory.attendees_of(&next.id).await?;
    let queue_name = directory.queue_name(queue).await?;

    info!(
        queue = %queue,
        removed = %meeting_id,
        new_front = %next.id,
        attendees = attendees.len(),
        "Front meeting removed, notifying next in line"
    );

    Ok(notify::dispatch(notifier, &attendees, &up_next_alert(&queue_name)).await)
}

/// Returns the new front meeting when the removal caused a front transition
/// and the queue is not empty afterwards.
async fn try_remove(
    store: &dyn TransactionalMeetingStore,
    queue: &QueueId,
    meeting_id: &MeetingId,
) -> Result<Option<Meeting>> {
    let mut tx = store.begin_transaction(queue).await?;

    // State immediately before removal (including the meeting)
    let active = tx.active_meetings().await?;
    let front_before = front_meeting(&active).map(|m| m.id.clone());

    if !tx.remove(meeting_id).await? {
        tx.rollback().await?;
        return Err(DomainError::MeetingNotFound(meeting_id.clone()).into());
    }

    // State excluding the removed meeting
    let remaining: Vec<Meeting> = active
        .into_iter()
        .filter(|m| m.id != *meeting_id)
        .collect();
    let front_after = front_meeting(&remaining).cloned();

    tx.commit().await?;

    let was_front = front_before.as_deref() == Some(meeting_id.as_str());
    debug!(
        queue = %queue,
        meeting_id = %meeting_id,
        was_front = was_front,
        remaining = remaining.len(),
        "Meeting removed"
    );

    if was_front {
        Ok(front_after)
    } else {
        Ok(None)
    }
}

fn up_next_alert(queue_name: &str) -> String {
    format!("You're next in \"{}\".", queue_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_next_alert_names_the_queue() {
        assert!(up_next_alert("Office Hours").contains("Office Hours"));
    }
}
