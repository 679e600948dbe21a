//! Rate limiting for high-frequency events
//!
//! Both limiters work on caller-supplied millisecond timestamps so they can
//! be driven by `performance.now()` in the browser and by plain numbers in
//! tests.

/// Leading-edge debounce
///
/// The first call of a burst fires. Later calls are swallowed until the
/// events have been quiet for `wait_ms`.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait_ms: u64,
    last_call: Option<u64>,
}

impl Debounce {
    pub const DEFAULT_WAIT_MS: u64 = 20;

    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            last_call: None,
        }
    }

    /// Returns whether the handler should run for this event
    pub fn call(&mut self, now_ms: u64) -> bool {
        let fire = match self.last_call {
            Some(last) => now_ms.saturating_sub(last) >= self.wait_ms,
            None => true,
        };
        self.last_call = Some(now_ms);
        fire
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WAIT_MS)
    }
}

/// At most one call per `limit_ms`, with a trailing call
///
/// An event swallowed inside the window is remembered. The host arms a timer
/// for `due_in()` and calls `flush()` when it expires, so the last event of a
/// burst always runs.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit_ms: u64,
    last_fire: Option<u64>,
    trailing: bool,
}

impl Throttle {
    pub const DEFAULT_LIMIT_MS: u64 = 100;

    pub fn new(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            last_fire: None,
            trailing: false,
        }
    }

    pub fn call(&mut self, now_ms: u64) -> bool {
        let fire = match self.last_fire {
            Some(last) => now_ms.saturating_sub(last) >= self.limit_ms,
            None => true,
        };
        if fire {
            self.last_fire = Some(now_ms);
            self.trailing = false;
        } else {
            self.trailing = true;
        }
        fire
    }

    #[inline]
    pub fn has_trailing(&self) -> bool {
        self.trailing
    }

    /// Milliseconds until the trailing call may run
    pub fn due_in(&self, now_ms: u64) -> Option<u64> {
        if !self.trailing {
            return None;
        }
        let last = self.last_fire.unwrap_or(now_ms);
        Some((last + self.limit_ms).saturating_sub(now_ms))
    }

    /// Returns whether the pending trailing call should run now
    pub fn flush(&mut self, now_ms: u64) -> bool {
        if !self.trailing {
            return false;
        }
        self.trailing = false;
        self.last_fire = Some(now_ms);
        true
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_leading_edge() {
        let mut debounce = Debounce::default();
        assert!(debounce.call(0));
        assert!(!debounce.call(10));
        assert!(!debounce.call(25));
        // Quiet for 20ms since the last call
        assert!(debounce.call(45));
    }

    #[test]
    fn test_debounce_continuous_burst_fires_once() {
        let mut debounce = Debounce::new(20);
        let fired = (0..100).filter(|i| debounce.call(i * 5)).count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_throttle() {
        let mut throttle = Throttle::default();
        let fired: Vec<u64> = (0..=30).map(|i| i * 10).filter(|&t| throttle.call(t)).collect();
        assert_eq!(fired, vec![0, 100, 200, 300]);
        assert!(!throttle.has_trailing());
    }

    #[test]
    fn test_throttle_runs_last_call_of_burst() {
        let mut throttle = Throttle::default();
        assert!(throttle.call(1000));
        assert!(!throttle.call(1050));
        assert!(!throttle.call(1070));
        assert!(throttle.has_trailing());
        assert_eq!(throttle.due_in(1070), Some(30));

        assert!(throttle.flush(1100));
        assert_eq!(throttle.due_in(1100), None);
        assert!(!throttle.flush(1101));

        // The trailing run opens a fresh window
        assert!(!throttle.call(1150));
        assert!(throttle.call(1200));
        assert!(!throttle.has_trailing());
    }
}
