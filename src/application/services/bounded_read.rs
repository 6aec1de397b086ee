//! Time-bounded repository reads.

use crate::infrastructure::persistence::{RepositoryError, RepositoryResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Awaits `read`, failing with `RepositoryError::Timeout` once `limit`
/// has elapsed.
pub(crate) async fn bounded<T, F>(
    entity_type: &'static str,
    limit: Duration,
    read: F,
) -> RepositoryResult<T>
where
    F: Future<Output = RepositoryResult<T>>,
{
    match timeout(limit, read).await {
        Ok(result) => {
            if let Err(e) = &result {
                tracing::warn!(entity = entity_type, error = %e, "repository read failed");
            }
            result
        }
        Err(_) => {
            let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(entity = entity_type, timeout_ms, "repository read timed out");
            Err(RepositoryError::timeout(entity_type, timeout_ms))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_fast_reads() {
        let value = bounded("ShippingZone", Duration::from_millis(100), async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn passes_through_errors() {
        let err = bounded::<(), _>("ShippingZone", Duration::from_millis(100), async {
            Err(RepositoryError::connection("refused"))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, RepositoryError::Connection(_)));
    }

    #[tokio::test]
    async fn slow_reads_time_out() {
        let err = bounded("ShippingRate", Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(err.is_timeout());
        assert!(err.to_string().contains("20ms"));
    }
}
