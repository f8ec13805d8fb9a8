// Transaction port for atomic queue mutations

use crate::domain::{Meeting, MeetingId, QueueId, SequenceNo};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Transactional access to a queue's active-meeting set
#[async_trait]
pub trait TransactionalMeetingStore: Send + Sync {
    /// Begin a transaction scoped to one queue. No mutation from a
    /// concurrent operation on the same queue is observable inside it.
    async fn begin_transaction(&self, queue: &QueueId) -> Result<Box<dyn QueueTransaction>>;
}

/// Active-meeting-set operations within a queue-scoped transaction
#[async_trait]
pub trait QueueTransaction: Transaction {
    /// Snapshot of the queue's active meetings
    async fn active_meetings(&mut self) -> Result<Vec<Meeting>>;

    /// Next insertion sequence number (monotonic, never reused)
    async fn next_seq(&mut self) -> Result<SequenceNo>;

    /// Insert a meeting into the active set
    async fn insert(&mut self, meeting: &Meeting) -> Result<()>;

    /// Remove a meeting from the active set; returns false if it was
    /// not active (hard delete, no tombstone)
    async fn remove(&mut self, meeting: &MeetingId) -> Result<bool>;
}
