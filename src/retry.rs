//! Retry loop for transient provider failures.

use std::future::Future;

use tracing::debug;

use crate::error::Result;

/// Options for the retry loop.
#[derive(Debug, Clone)]
pub struct RetryOptions {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
}

impl Default for RetryOptions {
    fn default() -> Self {
        // Folder-items fetches get three retries; see the walker.
        Self { max_retries: 3 }
    }
}

/// Run `f`, retrying while it fails with a retryable error and the retry
/// budget lasts. Non-retryable errors escalate immediately.
pub async fn run<T, F, Fut>(f: F, options: &RetryOptions) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < options.max_retries => {
                attempt += 1;
                debug!("retrying after transient failure (attempt {attempt}): {err}");
            }
            Err(err) => return Err(err),
        }
    }
}
