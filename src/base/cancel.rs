//! Cooperative cancellation.

use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Signal that a computation was abandoned because its token was cancelled.
///
/// This is not a failure: a newer computation supersedes this one, or the
/// caller no longer needs the result. Callers keep showing the previous result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation was cancelled")]
pub struct Cancelled;

/// Poll the token, failing fast when cancellation was requested.
#[inline]
pub fn check_cancelled(cancel: &CancellationToken) -> Result<(), Cancelled> {
    if cancel.is_cancelled() {
        Err(Cancelled)
    } else {
        Ok(())
    }
}
