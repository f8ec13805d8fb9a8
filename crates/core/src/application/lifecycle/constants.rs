// Lifecycle manager tuning constants

use std::time::Duration;

/// Maximum internal retries when the store reports a transaction conflict
pub const MAX_CONFLICT_RETRIES: u32 = 5;

/// Delay between conflict retries
pub const CONFLICT_RETRY_DELAY: Duration = Duration::from_millis(25);
