// Notifier Port
// Fire-and-forget message delivery to a contact address; the transport
// (SMS, etc.) lives behind this interface

use crate::domain::Contact;
use async_trait::async_trait;
use thiserror::Error;

/// Notification send errors
///
/// The core never propagates these past the dispatch layer; they are
/// logged and counted per recipient.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Rejected by provider: {0}")]
    Rejected(String),

    #[error("Invalid contact address: {0}")]
    InvalidContact(String),
}

/// Notifier trait
///
/// Implementations:
/// - SmsNotifier: Twilio-style HTTP messaging API (infra-sms)
/// - RecordingNotifier: test fake capturing addressed contacts
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a message to one contact address.
    ///
    /// Message content is opaque to the transport. Delivery guarantees are
    /// out of scope; a returned `Ok` means the transport accepted the send.
    async fn send(&self, to: &Contact, message: &str) -> Result<(), NotifyError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Mock notifier behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Accept every send
        Succeed,
        /// Fail every send with a transport error
        Fail(String),
    }

    /// Recording notifier for tests: captures every (contact, message) pair
    pub struct RecordingNotifier {
        behavior: MockBehavior,
        sent: Mutex<Vec<(Contact, String)>>,
    }

    impl RecordingNotifier {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                sent: Mutex::new(Vec::new()),
            }
        }

        pub fn new_succeeding() -> Self {
            Self::new(MockBehavior::Succeed)
        }

        pub fn new_failing(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail(message.into()))
        }

        /// Set of contact addresses that received a send attempt
        pub fn receivers(&self) -> HashSet<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(c, _)| c.as_str().to_string())
                .collect()
        }

        pub fn sent_messages(&self) -> Vec<(Contact, String)> {
            self.sent.lock().unwrap().clone()
        }

        pub fn send_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }

        /// Forget everything recorded so far (between scenario steps)
        pub fn reset(&self) {
            self.sent.lock().unwrap().clear();
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, to: &Contact, message: &str) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .unwrap()
                .push((to.clone(), message.to_string()));

            match &self.behavior {
                MockBehavior::Succeed => Ok(()),
                MockBehavior::Fail(msg) => Err(NotifyError::Transport(msg.clone())),
            }
        }
    }
}
