//! Sticky header scroll state
//!
//! Tracks which way the page is moving so the header can hide on the way
//! down and come back on the way up, and marks it once the page has scrolled
//! past a threshold.

use crate::config::HeaderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    None,
    Up,
    Down,
}

impl ScrollDirection {
    /// Class the header carries for this direction
    pub fn class(&self) -> Option<&'static str> {
        match self {
            ScrollDirection::None => None,
            ScrollDirection::Up => Some("scroll-up"),
            ScrollDirection::Down => Some("scroll-down"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderView {
    pub scrolled: bool,
    pub direction: ScrollDirection,
}

#[derive(Debug, Clone)]
pub struct HeaderState {
    config: HeaderConfig,
    last_offset: f64,
    view: HeaderView,
}

impl HeaderState {
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            config,
            last_offset: 0.0,
            view: HeaderView {
                scrolled: false,
                direction: ScrollDirection::None,
            },
        }
    }

    pub fn view(&self) -> HeaderView {
        self.view
    }

    /// Scroll event; returns the view to mirror into the header's classes
    pub fn on_scroll(&mut self, offset: f64) -> HeaderView {
        if offset <= 0.0 {
            self.last_offset = 0.0;
            self.view = HeaderView {
                scrolled: false,
                direction: ScrollDirection::None,
            };
            return self.view;
        }

        if offset > self.last_offset && self.view.direction != ScrollDirection::Down {
            self.view.direction = ScrollDirection::Down;
        } else if offset < self.last_offset && self.view.direction == ScrollDirection::Down {
            self.view.direction = ScrollDirection::Up;
        }
        self.last_offset = offset;
        self.view.scrolled = offset > self.config.scrolled_threshold;
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_changes() {
        let mut header = HeaderState::new(HeaderConfig::default());
        assert_eq!(header.on_scroll(50.0).direction, ScrollDirection::Down);
        assert_eq!(header.on_scroll(80.0).direction, ScrollDirection::Down);
        assert_eq!(header.on_scroll(60.0).direction, ScrollDirection::Up);
        // Stays up until the page moves down again
        assert_eq!(header.on_scroll(40.0).direction, ScrollDirection::Up);
        assert_eq!(header.on_scroll(45.0).direction, ScrollDirection::Down);
    }

    #[test]
    fn test_direction_classes() {
        assert_eq!(ScrollDirection::Down.class(), Some("scroll-down"));
        assert_eq!(ScrollDirection::Up.class(), Some("scroll-up"));
        let mut header = HeaderState::new(HeaderConfig::default());
        header.on_scroll(300.0);
        assert_eq!(header.on_scroll(0.0).direction.class(), None);
    }

    #[test]
    fn test_scrolled_threshold() {
        let mut header = HeaderState::new(HeaderConfig::default());
        assert!(!header.on_scroll(100.0).scrolled);
        assert!(header.on_scroll(101.0).scrolled);
        assert!(!header.on_scroll(20.0).scrolled);
    }

    #[test]
    fn test_top_clears_everything() {
        let mut header = HeaderState::new(HeaderConfig::default());
        header.on_scroll(500.0);
        let view = header.on_scroll(0.0);
        assert!(!view.scrolled);
        assert_eq!(view.direction, ScrollDirection::None);
        assert_eq!(view.direction.class(), None);
    }
}
