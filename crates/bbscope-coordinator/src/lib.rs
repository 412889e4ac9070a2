//! Drives one bbscope polling cycle: authenticate each platform poller,
//! list and filter its program handles, fan work out to a bounded worker
//! pool, and fold the results into the store.

mod build_entries;
mod config;
mod cycle;

pub use build_entries::build_entries;
pub use config::{CoordinatorConfig, PlatformSettings};
pub use cycle::{run_poll_cycle, CycleError, CycleReport, PLATFORM_GUARD_THRESHOLD};
