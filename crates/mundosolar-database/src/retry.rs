//! Retry-once helper for transient read failures.
//!
//! Reserved for read queries (dashboards, reports); user-facing writes are
//! never retried.

use std::future::Future;

use mundosolar_core::error::{AppError, ErrorKind};
use tracing::warn;

/// Run a fallible database read, retrying exactly once if the first
/// attempt fails with a database error.
pub async fn with_retry_once<T, F, Fut>(label: &str, mut op: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    match op().await {
        Ok(value) => Ok(value),
        Err(err) if err.kind == ErrorKind::Database => {
            warn!(query = label, error = %err, "Transient database error, retrying once");
            op().await
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retries_database_errors_once() {
        let calls = AtomicU32::new(0);
        let result = with_retry_once("test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(AppError::database("connection reset"))
                } else {
                    Ok(42)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_does_not_retry_other_kinds() {
        let calls = AtomicU32::new(0);
        let result: Result<i32, _> = with_retry_once("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::validation("bad input")) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_second_failure() {
        let calls = AtomicU32::new(0);
        let result: Result<i32, _> = with_retry_once("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::database("still down")) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
