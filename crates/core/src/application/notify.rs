//! Notification dispatch - fan-out of one message to a recipient set
//!
//! Runs strictly after the queue transaction commits, so transport latency
//! never holds the queue lock. Sends are concurrent with no mutual ordering;
//! each recipient is independent. Failures are logged and counted, never
//! raised - the meeting mutation is the primary effect and has already
//! committed by the time dispatch runs.

use crate::domain::Person;
use crate::port::Notifier;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Per-operation dispatch report
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NotifyOutcome {
    /// Sends accepted by the transport
    pub sent: usize,
    /// Recipients without a contact address
    pub skipped: usize,
    /// Sends the transport refused
    pub failed: usize,
}

/// Send `message` to every recipient that has a contact address.
pub async fn dispatch(
    notifier: Arc<dyn Notifier>,
    recipients: &[Person],
    message: &str,
) -> NotifyOutcome {
    let mut outcome = NotifyOutcome::default();
    let mut sends = Vec::new();

    for person in recipients {
        let contact = match &person.contact {
            Some(c) => c.clone(),
            None => {
                debug!(person_id = %person.id, "Recipient has no contact, skipping");
                outcome.skipped += 1;
                continue;
            }
        };

        let notifier = Arc::clone(&notifier);
        let person_id = person.id.clone();
        let message = message.to_string();
        sends.push(async move {
            match notifier.send(&contact, &message).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(
                        person_id = %person_id,
                        contact = %contact,
                        error = %e,
                        "Notification send failed"
                    );
                    false
                }
            }
        });
    }

    for accepted in join_all(sends).await {
        if accepted {
            outcome.sent += 1;
        } else {
            outcome.failed += 1;
        }
    }

    outcome
}
