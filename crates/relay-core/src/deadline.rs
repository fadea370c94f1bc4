//! Bounded provider calls.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::ProviderError;

/// Run a provider call, treating anything slower than `limit` as a timeout.
///
/// The call is not retried; the inner future is dropped when the limit
/// is reached.
pub async fn with_deadline<T, F>(provider: &str, limit: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::timeout(provider)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let result = with_deadline("test", Duration::from_secs(1), async { Ok::<_, ProviderError>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), _> = with_deadline("test", Duration::from_secs(1), async {
            Err(ProviderError::failed("test", "boom"))
        })
        .await;
        assert_eq!(result, Err(ProviderError::failed("test", "boom")));
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let result: Result<(), _> = with_deadline("slow", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(())
        })
        .await;
        assert_eq!(result, Err(ProviderError::timeout("slow")));
    }
}
