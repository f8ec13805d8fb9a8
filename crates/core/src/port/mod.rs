// Port Layer - Interfaces for external dependencies

pub mod directory;
pub mod id_provider; // For deterministic testing
pub mod meeting_store;
pub mod notifier;
pub mod time_provider;
pub mod transaction;

// Re-exports
pub use directory::Directory;
pub use id_provider::IdProvider;
pub use meeting_store::MeetingStore;
pub use notifier::{Notifier, NotifyError};
pub use time_provider::TimeProvider;
pub use transaction::{QueueTransaction, Transaction, TransactionalMeetingStore};
