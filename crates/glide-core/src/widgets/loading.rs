//! Loading screen
//!
//! Fades out a fixed time after page load, then leaves the DOM once the fade
//! has finished.

use crate::config::LoadingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingPhase {
    Visible,
    /// `loaded` class applied, fade in progress
    Loaded,
    /// Element removed
    Removed,
}

#[derive(Debug, Clone)]
pub struct LoadingScreen {
    config: LoadingConfig,
    started_at: Option<u64>,
    phase: LoadingPhase,
}

impl LoadingScreen {
    pub fn new(config: LoadingConfig) -> Self {
        Self {
            config,
            started_at: None,
            phase: LoadingPhase::Visible,
        }
    }

    #[inline]
    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    /// Window `load` event
    pub fn on_load(&mut self, now_ms: u64) {
        if self.started_at.is_none() {
            self.started_at = Some(now_ms);
        }
    }

    /// Milliseconds until the next phase change, if one is scheduled
    pub fn next_due_in(&self, now_ms: u64) -> Option<u64> {
        let start = self.started_at?;
        let due = match self.phase {
            LoadingPhase::Visible => start + self.config.hide_after_ms,
            LoadingPhase::Loaded => start + self.config.hide_after_ms + self.config.remove_after_ms,
            LoadingPhase::Removed => return None,
        };
        Some(due.saturating_sub(now_ms))
    }

    /// Advance; returns the new phase when it changed
    pub fn tick(&mut self, now_ms: u64) -> Option<LoadingPhase> {
        let start = self.started_at?;
        let elapsed = now_ms.saturating_sub(start);
        let next = if elapsed >= self.config.hide_after_ms + self.config.remove_after_ms {
            LoadingPhase::Removed
        } else if elapsed >= self.config.hide_after_ms {
            LoadingPhase::Loaded
        } else {
            LoadingPhase::Visible
        };
        if next == self.phase {
            return None;
        }
        self.phase = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        let mut screen = LoadingScreen::new(LoadingConfig::default());
        assert_eq!(screen.tick(5000), None);

        screen.on_load(100);
        assert_eq!(screen.next_due_in(100), Some(2000));
        assert_eq!(screen.tick(2099), None);
        assert_eq!(screen.tick(2100), Some(LoadingPhase::Loaded));
        assert_eq!(screen.next_due_in(2100), Some(1000));
        assert_eq!(screen.tick(3100), Some(LoadingPhase::Removed));
        assert_eq!(screen.tick(9000), None);
        assert_eq!(screen.next_due_in(9000), None);
    }

    #[test]
    fn test_late_tick_goes_straight_to_removed() {
        let mut screen = LoadingScreen::new(LoadingConfig::default());
        screen.on_load(0);
        assert_eq!(screen.tick(10_000), Some(LoadingPhase::Removed));
    }
}
