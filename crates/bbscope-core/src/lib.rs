//! Shared infrastructure for bbscope: data-directory resolution and the
//! busy-wait contention retry primitive the store wraps every write in.

mod path;
mod retry;

pub use path::{expand_tilde, resolve_data_path};
pub use retry::{retry_on_contention, retry_on_contention_with, RetryPolicy, INITIAL_BACKOFF, MAX_LOCK_RETRIES};
pub use path::Error as PathError;
pub use path::Result as PathResult;
