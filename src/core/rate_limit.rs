use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Spaces outgoing fetches evenly. Shared by clones, so concurrent script
/// fetches draw from one budget.
#[derive(Clone)]
pub struct RateLimiter {
    interval: Duration,
    next_slot: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// rate = requests per second, 0 = unlimited
    pub fn new(rate: u32) -> Self {
        let interval = if rate == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / rate as f64)
        };

        Self {
            interval,
            next_slot: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.interval.is_zero()
    }

    /// Reserves the next slot, then sleeps until it arrives. The lock is
    /// released before sleeping so waiters queue on distinct slots.
    pub async fn wait(&self) {
        if self.is_unlimited() {
            return;
        }
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = (*next).max(now);
            *next = slot + self.interval;
            slot
        };
        tokio::time::sleep_until(slot.into()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unlimited_never_waits() {
        let limiter = RateLimiter::new(0);
        assert!(limiter.is_unlimited());
        let start = Instant::now();
        for _ in 0..100 {
            limiter.wait().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_spacing() {
        let limiter = RateLimiter::new(50);
        let start = Instant::now();
        for _ in 0..3 {
            limiter.wait().await;
        }
        // Slots at 0, 20 and 40 ms.
        assert!(start.elapsed() >= Duration::from_millis(38));
    }
}
