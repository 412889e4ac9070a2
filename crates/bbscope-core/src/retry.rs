use std::thread::sleep;
use std::time::Duration;

/// Default cap on retry attempts for a contended store write (§5: "retry up
/// to 5 times with exponential backoff starting at 1s, doubling each
/// attempt").
pub const MAX_LOCK_RETRIES: u32 = 5;
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: MAX_LOCK_RETRIES,
            initial_backoff: INITIAL_BACKOFF,
        }
    }
}

/// Generic busy-wait retry loop for a fallible operation that may fail with
/// a transient contention error. `is_retryable` decides whether a given
/// error should trigger another attempt; non-retryable errors (including
/// the scope-wipe sentinel) return immediately on the first failure.
pub fn retry_on_contention<T, E>(
    op: impl FnMut() -> Result<T, E>,
    is_retryable: impl Fn(&E) -> bool,
) -> Result<T, E> {
    retry_on_contention_with(RetryPolicy::default(), op, is_retryable)
}

/// Same as [`retry_on_contention`] but with an explicit policy, so callers
/// (and tests) can shrink the backoff instead of inheriting the real
/// one-second start.
pub fn retry_on_contention_with<T, E>(
    policy: RetryPolicy,
    mut op: impl FnMut() -> Result<T, E>,
    is_retryable: impl Fn(&E) -> bool,
) -> Result<T, E> {
    let mut delay = policy.initial_backoff;
    let mut attempt = 0;

    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_retries || !is_retryable(&err) {
                    return Err(err);
                }
                attempt += 1;
                sleep(delay);
                delay *= 2;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_retries: MAX_LOCK_RETRIES,
            initial_backoff: Duration::from_millis(1),
        }
    }

    #[test]
    fn retries_until_success() {
        let attempts = Cell::new(0);
        let result: Result<i32, &str> = retry_on_contention_with(
            fast_policy(),
            || {
                let n = attempts.get() + 1;
                attempts.set(n);
                if n < 3 {
                    Err("locked")
                } else {
                    Ok(42)
                }
            },
            |_| true,
        );
        assert_eq!(result, Ok(42));
        assert_eq!(attempts.get(), 3);
    }

    #[test]
    fn gives_up_on_non_retryable_error_immediately() {
        let attempts = Cell::new(0);
        let result: Result<i32, &str> = retry_on_contention_with(
            fast_policy(),
            || {
                attempts.set(attempts.get() + 1);
                Err("fatal")
            },
            |_| false,
        );
        assert_eq!(result, Err("fatal"));
        assert_eq!(attempts.get(), 1);
    }

    #[test]
    fn stops_after_max_retries() {
        let attempts = Cell::new(0);
        let result: Result<i32, &str> = retry_on_contention_with(
            fast_policy(),
            || {
                attempts.set(attempts.get() + 1);
                Err("locked")
            },
            |_| true,
        );
        assert_eq!(result, Err("locked"));
        assert_eq!(attempts.get(), (MAX_LOCK_RETRIES + 1) as i32);
    }
}
