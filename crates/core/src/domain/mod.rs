// Domain Layer - Pure business logic and entities

pub mod error;
pub mod meeting;
pub mod person;
pub mod position;

// Re-exports
pub use error::DomainError;
pub use meeting::{Meeting, MeetingId, MeetingKind, QueueId, SequenceNo};
pub use person::{Contact, Person, PersonId};
pub use position::front_meeting;
