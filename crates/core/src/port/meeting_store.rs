// Meeting Store Port (Interface)
// Read side of the active-meeting set; mutation goes through QueueTransaction

use crate::domain::{Meeting, MeetingId, QueueId};
use crate::error::Result;
use async_trait::async_trait;

/// Store interface for querying active meetings
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// All active meetings of a queue
    async fn active_meetings(&self, queue: &QueueId) -> Result<Vec<Meeting>>;

    /// Find an active meeting by ID
    async fn find_by_id(&self, id: &MeetingId) -> Result<Option<Meeting>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::SequenceNo;
    use crate::port::{QueueTransaction, Transaction, TransactionalMeetingStore};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex as StdMutex};
    use tokio::sync::{Mutex, OwnedMutexGuard};

    #[derive(Debug, Default, Clone)]
    struct QueueState {
        meetings: Vec<Meeting>,
        last_seq: SequenceNo,
    }

    /// In-memory store with per-queue locking.
    ///
    /// A transaction holds the queue's mutex for its whole lifetime, so the
    /// before/after sequence in the lifecycle manager observes no interleaved
    /// mutation. Mutations apply to the live state; an undo snapshot restores
    /// it on rollback or drop-without-commit.
    pub struct InMemoryMeetingStore {
        queues: StdMutex<HashMap<QueueId, Arc<Mutex<QueueState>>>>,
    }

    impl InMemoryMeetingStore {
        pub fn new() -> Self {
            Self {
                queues: StdMutex::new(HashMap::new()),
            }
        }

        fn slot(&self, queue: &QueueId) -> Arc<Mutex<QueueState>> {
            self.queues
                .lock()
                .unwrap()
                .entry(queue.clone())
                .or_default()
                .clone()
        }
    }

    impl Default for InMemoryMeetingStore {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl MeetingStore for InMemoryMeetingStore {
        async fn active_meetings(&self, queue: &QueueId) -> Result<Vec<Meeting>> {
            let slot = self.slot(queue);
            let state = slot.lock().await;
            Ok(state.meetings.clone())
        }

        async fn find_by_id(&self, id: &MeetingId) -> Result<Option<Meeting>> {
            let slots: Vec<Arc<Mutex<QueueState>>> =
                self.queues.lock().unwrap().values().cloned().collect();
            for slot in slots {
                let state = slot.lock().await;
                if let Some(m) = state.meetings.iter().find(|m| m.id == *id) {
                    return Ok(Some(m.clone()));
                }
            }
            Ok(None)
        }
    }

    #[async_trait]
    impl TransactionalMeetingStore for InMemoryMeetingStore {
        async fn begin_transaction(&self, queue: &QueueId) -> Result<Box<dyn QueueTransaction>> {
            let slot = self.slot(queue);
            let guard = slot.lock_owned().await;
            let snapshot = guard.clone();
            Ok(Box::new(InMemoryQueueTransaction {
                guard,
                snapshot,
                committed: false,
            }))
        }
    }

    pub struct InMemoryQueueTransaction {
        guard: OwnedMutexGuard<QueueState>,
        snapshot: QueueState,
        committed: bool,
    }

    impl Drop for InMemoryQueueTransaction {
        fn drop(&mut self) {
            if !self.committed {
                *self.guard = self.snapshot.clone();
            }
        }
    }

    #[async_trait]
    impl Transaction for InMemoryQueueTransaction {
        async fn commit(mut self: Box<Self>) -> Result<()> {
            self.committed = true;
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<()> {
            // Drop restores the snapshot
            Ok(())
        }
    }

    #[async_trait]
    impl QueueTransaction for InMemoryQueueTransaction {
        async fn active_meetings(&mut self) -> Result<Vec<Meeting>> {
            Ok(self.guard.meetings.clone())
        }

        async fn next_seq(&mut self) -> Result<SequenceNo> {
            self.guard.last_seq += 1;
            Ok(self.guard.last_seq)
        }

        async fn insert(&mut self, meeting: &Meeting) -> Result<()> {
            self.guard.meetings.push(meeting.clone());
            Ok(())
        }

        async fn remove(&mut self, meeting: &MeetingId) -> Result<bool> {
            let before = self.guard.meetings.len();
            self.guard.meetings.retain(|m| m.id != *meeting);
            Ok(self.guard.meetings.len() < before)
        }
    }

}
