//! Animated numeric counters
//!
//! Counts from 0 to the target in fixed per-frame increments derived from
//! the configured duration and an assumed frame length, then lands exactly on
//! the target.

use crate::config::CounterConfig;
use crate::motion::timing::frame_count;
use crate::visibility::VisibilityOptions;
use crate::{Error, Result};

/// One frame of counter output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterFrame {
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct Counter {
    target: f64,
    current: f64,
    increment: f64,
    done: bool,
}

impl Counter {
    pub fn new(target: f64, config: &CounterConfig) -> Self {
        let frames = frame_count(config.duration_ms, config.frame_ms);
        Self {
            target,
            current: 0.0,
            increment: target / frames as f64,
            done: false,
        }
    }

    /// Build from a `data-count` attribute value
    pub fn from_attribute(value: &str, config: &CounterConfig) -> Result<Self> {
        Ok(Self::new(parse_target(value)?, config))
    }

    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance one frame
    pub fn step(&mut self) -> CounterFrame {
        if !self.done {
            self.current += self.increment;
        }
        if !self.done && self.current < self.target {
            CounterFrame {
                text: format_number(self.current.floor()),
                done: false,
            }
        } else {
            self.current = self.target;
            self.done = true;
            CounterFrame {
                text: format_number(self.target),
                done: true,
            }
        }
    }
}

/// When a counter starts running
pub fn trigger_options(config: &CounterConfig) -> VisibilityOptions {
    VisibilityOptions {
        threshold: config.threshold,
        root_margin: config.root_margin_px,
    }
}

/// Parse a counter target; rejects anything that is not a finite number
pub fn parse_target(value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidAttribute {
            name: "data-count".to_string(),
            value: value.to_string(),
        })
}

/// Thousands-grouped display with up to three fraction digits
pub fn format_number(value: f64) -> String {
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let whole = rounded.trunc() as u64;
    let fraction = ((rounded - rounded.trunc()) * 1000.0).round() as u64;

    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    if value < 0.0 && (whole > 0 || fraction > 0) {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if fraction > 0 {
        let fraction = format!("{:03}", fraction);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ends_exactly_at_target() {
        let mut counter = Counter::new(2500.0, &CounterConfig::default());
        let mut frames = 0;
        let mut prev_value = 0.0;
        let last = loop {
            let frame = counter.step();
            frames += 1;
            let value: f64 = frame.text.replace(',', "").parse().unwrap();
            assert!(value <= 2500.0);
            assert!(value >= prev_value);
            prev_value = value;
            if frame.done {
                break frame.text;
            }
        };
        assert_eq!(last, "2,500");
        assert_eq!(frames, 125);
        assert!(counter.is_done());
    }

    #[test]
    fn test_step_after_done_is_stable() {
        let mut counter = Counter::new(3.0, &CounterConfig::default());
        while !counter.step().done {}
        assert_eq!(counter.step().text, "3");
    }

    #[test]
    fn test_zero_target() {
        let mut counter = Counter::new(0.0, &CounterConfig::default());
        let frame = counter.step();
        assert!(frame.done);
        assert_eq!(frame.text, "0");
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target(" 150 ").unwrap(), 150.0);
        assert!(matches!(
            parse_target("lots"),
            Err(Error::InvalidAttribute { .. })
        ));
        assert!(parse_target("inf").is_err());
    }

    #[test]
    fn test_starts_once_inside_viewport() {
        use crate::element::{ElementId, Rect, Viewport};
        use crate::visibility::{GeometryDetector, VisibilityDetector};

        let viewport = Viewport::new(1000.0, 800.0);
        let mut detector = GeometryDetector::new();
        detector.observe(ElementId(1), trigger_options(&CounterConfig::default()));

        // Peeking in at the bottom edge is not enough
        let edge = Rect::new(0.0, 700.0, 200.0, 60.0);
        assert!(detector.update(viewport, |_| Some(edge)).is_empty());

        let inside = Rect::new(0.0, 600.0, 200.0, 60.0);
        assert_eq!(detector.update(viewport, |_| Some(inside)), vec![ElementId(1)]);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(98.5), "98.5");
        assert_eq!(format_number(-4200.0), "-4,200");
    }
}
