//! Testimonial carousel
//!
//! A clamped index over a fixed number of cards. Buttons and horizontal
//! swipes both go through the same index mutation; the track is moved with a
//! single translation proportional to the index.

use crate::config::CarouselConfig;
use crate::element::ElementId;
use crate::tween::{TweenProps, Tweener};

#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    index: usize,
    count: usize,
    touch_start_x: Option<f64>,
}

impl Carousel {
    /// `None` when there are no cards to show
    pub fn new(config: CarouselConfig, count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        Some(Self {
            config,
            index: 0,
            count,
            touch_start_x: None,
        })
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn prev_disabled(&self) -> bool {
        self.index == 0
    }

    #[inline]
    pub fn next_disabled(&self) -> bool {
        self.index >= self.count - 1
    }

    /// Returns whether the index moved
    pub fn next(&mut self) -> bool {
        self.go_to(self.index + 1)
    }

    pub fn prev(&mut self) -> bool {
        match self.index.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    /// Jump to `index`, clamped to the last card
    pub fn go_to(&mut self, index: usize) -> bool {
        let index = index.min(self.count - 1);
        if index == self.index {
            return false;
        }
        self.index = index;
        true
    }

    /// Resolve a horizontal gesture; swiping left shows the next card
    pub fn swipe(&mut self, start_x: f64, end_x: f64) -> bool {
        let difference = start_x - end_x;
        if difference > self.config.swipe_threshold {
            self.next()
        } else if difference < -self.config.swipe_threshold {
            self.prev()
        } else {
            false
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.touch_start_x = Some(x);
    }

    /// Completes a gesture begun with `touch_start`
    pub fn touch_end(&mut self, x: f64) -> bool {
        match self.touch_start_x.take() {
            Some(start) => self.swipe(start, x),
            None => false,
        }
    }

    /// Horizontal track translation for the current index
    pub fn track_offset(&self, card_width: f64) -> f64 {
        -(self.index as f64) * card_width
    }

    /// Slide the track to the current index
    pub fn animate_track<T>(&self, track: ElementId, card_width: f64, tweener: &mut T)
    where
        T: Tweener + ?Sized,
    {
        tweener.animate_to(
            track,
            TweenProps::translate_x(self.track_offset(card_width)),
            self.config.slide_duration_ms,
            self.config.easing,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tween::TweenLog;

    fn carousel(count: usize) -> Carousel {
        Carousel::new(CarouselConfig::default(), count).unwrap()
    }

    #[test]
    fn test_empty_carousel() {
        assert!(Carousel::new(CarouselConfig::default(), 0).is_none());
    }

    #[test]
    fn test_buttons_clamp_to_bounds() {
        let mut c = carousel(5);
        assert!(!c.prev());
        assert_eq!(c.index(), 0);
        assert!(c.prev_disabled());

        for _ in 0..4 {
            assert!(c.next());
        }
        assert_eq!(c.index(), 4);
        assert!(c.next_disabled());
        assert!(!c.prev_disabled());

        assert!(!c.next());
        assert_eq!(c.index(), 4);
    }

    #[test]
    fn test_swipe_threshold() {
        let mut c = carousel(5);
        assert!(c.swipe(300.0, 240.0));
        assert_eq!(c.index(), 1);

        assert!(!c.swipe(300.0, 270.0));
        assert_eq!(c.index(), 1);

        assert!(c.swipe(240.0, 300.0));
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_touch_gesture() {
        let mut c = carousel(3);
        assert!(!c.touch_end(100.0));
        c.touch_start(300.0);
        assert!(c.touch_end(100.0));
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn test_single_card_disables_both() {
        let c = carousel(1);
        assert!(c.prev_disabled());
        assert!(c.next_disabled());
    }

    #[test]
    fn test_track_tween() {
        let mut c = carousel(5);
        c.go_to(2);
        let mut log = TweenLog::new();
        c.animate_track(ElementId(7), 320.0, &mut log);
        let request = log.last().unwrap();
        assert_eq!(request.props.x, Some(-640.0));
        assert_eq!(request.duration_ms, 600);
        assert_eq!(c.track_offset(320.0), -640.0);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut c = carousel(3);
        assert!(c.go_to(10));
        assert_eq!(c.index(), 2);
    }
}
