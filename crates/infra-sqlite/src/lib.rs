// Waitline Infrastructure - SQLite Adapter
// Implements: Directory, MeetingStore, TransactionalMeetingStore

mod connection;
mod directory;
mod meeting_store;
mod migration;
mod transaction;

pub use connection::create_pool;
pub use directory::SqliteDirectory;
pub use meeting_store::SqliteMeetingStore;
pub use migration::run_migrations;
pub use transaction::SqliteQueueTransaction;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
