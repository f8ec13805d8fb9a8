// Meeting Domain Model

use serde::{Deserialize, Serialize};

/// Meeting ID (UUID v4 in production, injected via IdProvider)
pub type MeetingId = String;

/// Queue identifier
pub type QueueId = String;

/// Insertion sequence number (monotonic per store, never reused)
pub type SequenceNo = i64;

/// Meeting kind tag (e.g. "inperson", "video"); carried opaquely,
/// irrelevant to notification logic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingKind(String);

impl MeetingKind {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MeetingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Meeting Entity
///
/// Active from insertion into its queue's active set until removal.
/// Removal is a hard delete; there is no tombstone state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub queue: QueueId,
    pub kind: MeetingKind,

    pub created_at: i64, // epoch ms
    pub seq: SequenceNo, // assigned by the store at insertion
}

impl Meeting {
    /// Create a new Meeting
    ///
    /// # Arguments
    ///
    /// * `id` - Unique meeting ID (injected, not generated)
    /// * `queue` - Owning queue
    /// * `kind` - Opaque kind tag
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    /// * `seq` - Insertion sequence number (assigned by the store)
    pub fn new(
        id: impl Into<String>,
        queue: impl Into<String>,
        kind: MeetingKind,
        created_at: i64,
        seq: SequenceNo,
    ) -> Self {
        Self {
            id: id.into(),
            queue: queue.into(),
            kind,
            created_at,
            seq,
        }
    }

    /// Total ordering key within a queue: earliest creation wins,
    /// ties broken by insertion sequence
    pub fn order_key(&self) -> (i64, SequenceNo) {
        (self.created_at, self.seq)
    }
}
