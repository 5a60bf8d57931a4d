use crate::error::{BadgeServerError, Result};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Deadline for one resolver call, retries included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(8000);

/// Settles with `future`'s outcome or with [`BadgeServerError::Timeout`], whichever comes first.
///
/// On expiry the inner future is dropped, so a response that arrives later is
/// never observed.
pub async fn with_timeout<F, T>(deadline: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, future).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(deadline_ms = deadline.as_millis() as u64, "GitHub API deadline exceeded");
            Err(BadgeServerError::Timeout(deadline.as_millis() as u64))
        }
    }
}
