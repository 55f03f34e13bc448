//! Backoff policy and the blocking wait used after a failed attempt.
//!
//! A failure is never retried inside the same attempt: the executor waits one
//! jittered backoff and gives up, and the scheduler tries again next cycle.

mod policy;
mod sleep;

pub use policy::BackoffPolicy;
pub use sleep::{Sleeper, ThreadSleeper};
