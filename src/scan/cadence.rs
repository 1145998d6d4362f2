use std::time::{Duration, Instant};

pub const DEFAULT_EMIT_INTERVAL: Duration = Duration::from_millis(100);

/// Rate gate for partial snapshot emission. Time is passed in so the gate
/// is deterministic under test.
#[derive(Debug, Clone)]
pub struct EmitGate {
    interval: Duration,
    last: Instant,
}

impl EmitGate {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    /// Opens at most once per interval. Opening restarts the interval.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Marks an unconditional emission.
    pub fn mark(&mut self, now: Instant) {
        self.last = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_opens_once_per_interval() {
        let t0 = Instant::now();
        let mut gate = EmitGate::new(Duration::from_millis(100), t0);
        assert!(!gate.try_acquire(t0 + Duration::from_millis(50)));
        assert!(gate.try_acquire(t0 + Duration::from_millis(100)));
        assert!(!gate.try_acquire(t0 + Duration::from_millis(150)));
        assert!(gate.try_acquire(t0 + Duration::from_millis(201)));
    }

    #[test]
    fn test_mark_restarts_interval() {
        let t0 = Instant::now();
        let mut gate = EmitGate::new(Duration::from_millis(100), t0);
        gate.mark(t0 + Duration::from_millis(90));
        assert!(!gate.try_acquire(t0 + Duration::from_millis(150)));
        assert!(gate.try_acquire(t0 + Duration::from_millis(190)));
    }
}
