// Application Layer - Use Cases and Business Logic

pub mod lifecycle;
pub mod notify;

// Re-exports
pub use lifecycle::{CreateMeetingRequest, MeetingLifecycle};
pub use notify::NotifyOutcome;
