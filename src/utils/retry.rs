use std::future::Future;
use std::time::Duration;
use crate::error::AppResult;
use log::{warn, info, debug};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Probe once, never sleep.
    pub fn immediate() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    fn next_delay(&self, delay: Duration) -> Duration {
        std::cmp::min(
            Duration::from_millis((delay.as_millis() as f64 * self.backoff_multiplier) as u64),
            self.max_delay,
        )
    }
}

/// Calls `probe` until it reports ready, backing off exponentially between attempts.
///
/// Returns `Ok(false)` when the attempts run out without the probe reporting ready.
/// Probe errors count as "not ready yet"; the last one is logged.
pub async fn poll_until_ready<F, Fut>(config: &RetryConfig, what: &str, mut probe: F) -> AppResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<bool>>,
{
    let mut delay = config.base_delay;

    for attempt in 1..=config.max_attempts {
        match probe().await {
            Ok(true) => {
                if attempt > 1 {
                    info!("{} ready after {} checks", what, attempt);
                }
                return Ok(true);
            }
            Ok(false) => debug!("{} not ready (check {}), waiting {:?}", what, attempt, delay),
            Err(e) => debug!("{} readiness check {} failed: {}", what, attempt, e),
        }

        if attempt < config.max_attempts {
            tokio::time::sleep(delay).await;
            delay = config.next_delay(delay);
        }
    }

    warn!("{} still not ready after {} checks", what, config.max_attempts);
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_config(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            backoff_multiplier: 2.0,
        }
    }

    #[tokio::test]
    async fn test_ready_on_third_check() {
        let checks = Arc::new(AtomicU32::new(0));
        let counter = checks.clone();

        let ready = poll_until_ready(&fast_config(5), "attributes", || {
            let counter = counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst) >= 2) }
        })
        .await
        .unwrap();

        assert!(ready);
        assert_eq!(checks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let checks = Arc::new(AtomicU32::new(0));
        let counter = checks.clone();

        let ready = poll_until_ready(&fast_config(3), "attributes", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AppError::provider(503, "general_unavailable", "try later"))
            }
        })
        .await
        .unwrap();

        assert!(!ready);
        assert_eq!(checks.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_backoff_is_capped() {
        let config = RetryConfig::default();
        let mut delay = config.base_delay;
        for _ in 0..10 {
            delay = config.next_delay(delay);
        }
        assert_eq!(delay, config.max_delay);
    }
}
