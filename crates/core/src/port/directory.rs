// Directory Port (Interface)
// Read-only lookup of a queue's hosts and a meeting's attendees

use crate::domain::{MeetingId, Person, QueueId};
use crate::error::Result;
use async_trait::async_trait;

/// Directory interface over the user/profile store (external collaborator)
#[async_trait]
pub trait Directory: Send + Sync {
    /// Hosts of a queue (unordered). Unknown queue is `NotFound`.
    async fn hosts_of(&self, queue: &QueueId) -> Result<Vec<Person>>;

    /// Attendees of a meeting, reproduced from the snapshot taken at
    /// creation time. Unknown meeting is `NotFound`.
    async fn attendees_of(&self, meeting: &MeetingId) -> Result<Vec<Person>>;

    /// Human-readable queue name for message templates
    async fn queue_name(&self, queue: &QueueId) -> Result<String>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Hash-map backed directory for tests
    pub struct StaticDirectory {
        names: Mutex<HashMap<QueueId, String>>,
        hosts: Mutex<HashMap<QueueId, Vec<Person>>>,
        attendees: Mutex<HashMap<MeetingId, Vec<Person>>>,
    }

    impl StaticDirectory {
        pub fn new() -> Self {
            Self {
                names: Mutex::new(HashMap::new()),
                hosts: Mutex::new(HashMap::new()),
                attendees: Mutex::new(HashMap::new()),
            }
        }

        pub fn add_queue(&self, queue: impl Into<String>, name: impl Into<String>, hosts: Vec<Person>) {
            let queue = queue.into();
            self.names.lock().unwrap().insert(queue.clone(), name.into());
            self.hosts.lock().unwrap().insert(queue, hosts);
        }

        pub fn set_attendees(&self, meeting: impl Into<String>, attendees: Vec<Person>) {
            self.attendees.lock().unwrap().insert(meeting.into(), attendees);
        }
    }

    impl Default for StaticDirectory {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Directory for StaticDirectory {
        async fn hosts_of(&self, queue: &QueueId) -> Result<Vec<Person>> {
            self.hosts
                .lock()
                .unwrap()
                .get(queue)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Queue not found: {}", queue)))
        }

        async fn attendees_of(&self, meeting: &MeetingId) -> Result<Vec<Person>> {
            self.attendees
                .lock()
                .unwrap()
                .get(meeting)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Meeting not found: {}", meeting)))
        }

        async fn queue_name(&self, queue: &QueueId) -> Result<String> {
            self.names
                .lock()
                .unwrap()
                .get(queue)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Queue not found: {}", queue)))
        }
    }
}
