//! Stateful surge detector for one tracked asset.

use std::future::Future;

use tokio::sync::Mutex;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rose,
    Fell,
}

/// Emitted when the price moved more than the threshold between two polls.
#[derive(Debug, Clone)]
pub struct SurgeAlert {
    pub direction: Direction,
    /// Signed percentage move since the previous poll.
    pub percent: f64,
    pub current_price: f64,
}

/// Retains the last observed price and compares it against each new poll.
pub struct SurgeMonitor {
    threshold: f64,
    last_price: Mutex<Option<f64>>,
}

impl SurgeMonitor {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            last_price: Mutex::new(None),
        }
    }

    /// Fetch the current price and compare it against the previous poll.
    ///
    /// The first successful poll only seeds the baseline and never alerts.
    /// A failed fetch propagates the error and leaves the baseline untouched,
    /// so a transient outage cannot corrupt the comparison state.
    pub async fn poll_with<F, Fut>(&self, fetch: F) -> Result<Option<SurgeAlert>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<f64>>,
    {
        let current = fetch().await?;

        let mut last = self.last_price.lock().await;
        let alert = match *last {
            None => None,
            Some(previous) => {
                let delta = (current - previous) / previous;
                if delta.abs() > self.threshold {
                    Some(SurgeAlert {
                        direction: if delta > 0.0 {
                            Direction::Rose
                        } else {
                            Direction::Fell
                        },
                        percent: delta * 100.0,
                        current_price: current,
                    })
                } else {
                    None
                }
            }
        };
        *last = Some(current);
        Ok(alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    async fn poll(monitor: &SurgeMonitor, price: f64) -> Option<SurgeAlert> {
        monitor
            .poll_with(|| std::future::ready(Ok(price)))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_poll_only_seeds_the_baseline() {
        let monitor = SurgeMonitor::new(0.05);
        assert!(poll(&monitor, 9000.0).await.is_none());
    }

    #[tokio::test]
    async fn six_percent_rise_alerts() {
        let monitor = SurgeMonitor::new(0.05);
        poll(&monitor, 100.0).await;

        let alert = poll(&monitor, 106.0).await.expect("alert");
        assert_eq!(alert.direction, Direction::Rose);
        assert!((alert.percent - 6.0).abs() < 1e-9);
        assert_eq!(alert.current_price, 106.0);
    }

    #[tokio::test]
    async fn four_percent_move_stays_quiet() {
        let monitor = SurgeMonitor::new(0.05);
        poll(&monitor, 100.0).await;
        assert!(poll(&monitor, 104.0).await.is_none());
    }

    #[tokio::test]
    async fn drop_beyond_threshold_alerts_with_fell() {
        let monitor = SurgeMonitor::new(0.05);
        poll(&monitor, 100.0).await;

        let alert = poll(&monitor, 94.0).await.expect("alert");
        assert_eq!(alert.direction, Direction::Fell);
        assert!((alert.percent + 6.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn baseline_moves_forward_even_without_alert() {
        let monitor = SurgeMonitor::new(0.05);
        poll(&monitor, 100.0).await;
        poll(&monitor, 104.0).await;

        // 104 -> 110 is ~5.77% against the refreshed baseline.
        let alert = poll(&monitor, 110.0).await.expect("alert");
        assert_eq!(alert.direction, Direction::Rose);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_state_untouched() {
        let monitor = SurgeMonitor::new(0.05);
        poll(&monitor, 100.0).await;

        let failed = monitor
            .poll_with(|| std::future::ready(Err(Error::Fetch("down".into()))))
            .await;
        assert!(failed.is_err());

        // Baseline is still 100, so 106 alerts.
        let alert = poll(&monitor, 106.0).await.expect("alert");
        assert_eq!(alert.direction, Direction::Rose);
    }
}
