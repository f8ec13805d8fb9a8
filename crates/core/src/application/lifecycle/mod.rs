// Meeting Lifecycle Manager - reacts to meeting creation/removal and
// notifies whoever's position relative to the front of the queue changed

pub mod constants;
pub mod create;
pub mod remove;

pub use create::CreateMeetingRequest;

use crate::application::notify::NotifyOutcome;
use crate::domain::{Meeting, MeetingId, QueueId};
use crate::error::Result;
use crate::port::{Directory, IdProvider, Notifier, TimeProvider, TransactionalMeetingStore};
use std::sync::Arc;

/// Meeting Lifecycle Manager
///
/// The surrounding application calls `on_meeting_created` /
/// `on_meeting_removed` explicitly as part of its own create/delete flow;
/// there is no implicit event propagation. Both operations are synchronous
/// with respect to the mutation; notification delivery is best-effort and
/// reported through the returned `NotifyOutcome`.
pub struct MeetingLifecycle {
    store: Arc<dyn TransactionalMeetingStore>,
    directory: Arc<dyn Directory>,
    notifier: Arc<dyn Notifier>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl MeetingLifecycle {
    pub fn new(
        store: Arc<dyn TransactionalMeetingStore>,
        directory: Arc<dyn Directory>,
        notifier: Arc<dyn Notifier>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            store,
            directory,
            notifier,
            id_provider,
            time_provider,
        }
    }

    /// Insert a new meeting; notifies the queue's hosts when the queue went
    /// empty -> non-empty
    pub async fn on_meeting_created(
        &self,
        req: CreateMeetingRequest,
    ) -> Result<(Meeting, NotifyOutcome)> {
        create::execute(
            self.store.as_ref(),
            self.directory.as_ref(),
            Arc::clone(&self.notifier),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            req,
        )
        .await
    }

    /// Remove an active meeting; notifies the new front meeting's attendees
    /// when the removed meeting was the front and the queue is not empty
    pub async fn on_meeting_removed(
        &self,
        queue: &QueueId,
        meeting_id: &MeetingId,
    ) -> Result<NotifyOutcome> {
        remove::execute(
            self.store.as_ref(),
            self.directory.as_ref(),
            Arc::clone(&self.notifier),
            queue,
            meeting_id,
        )
        .await
    }
}
