//! Viewport visibility detection
//!
//! `VisibilityDetector` is the seam between the engines and whatever tells
//! them an element scrolled into view. In the browser that is an
//! `IntersectionObserver`; `GeometryDetector` does the same job from plain
//! rectangles so the engines run headless.

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, Rect, Viewport};

/// When an element counts as sufficiently visible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityOptions {
    /// Minimum intersection ratio, 0.0-1.0
    pub threshold: f64,
    /// Pixels added above and below the viewport
    pub root_margin: f64,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: 0.0,
        }
    }
}

/// Registers elements for visibility tracking
pub trait VisibilityDetector {
    /// False when the underlying capability does not exist; callers must
    /// fall back to treating everything as visible
    fn is_available(&self) -> bool {
        true
    }

    fn observe(&mut self, id: ElementId, options: VisibilityOptions);

    /// Stop tracking for good
    fn unobserve(&mut self, id: ElementId);
}

/// Fraction of `rect` inside the viewport grown vertically by `margin`
pub fn intersection_ratio(rect: &Rect, viewport: &Viewport, margin: f64) -> f64 {
    let region = viewport.rect().expand_y(margin);
    if rect.area() == 0.0 {
        let origin = crate::element::Point::new(rect.left, rect.top);
        return if region.contains(origin) { 1.0 } else { 0.0 };
    }
    match rect.intersection(&region) {
        Some(overlap) => (overlap.area() / rect.area()).clamp(0.0, 1.0),
        None => 0.0,
    }
}

/// Whether `rect` meets `options` against `viewport`
pub fn is_sufficiently_visible(rect: &Rect, viewport: &Viewport, options: &VisibilityOptions) -> bool {
    let region = viewport.rect().expand_y(options.root_margin);
    if rect.intersection(&region).is_none() {
        return false;
    }
    intersection_ratio(rect, viewport, options.root_margin) >= options.threshold
}

#[derive(Debug, Clone)]
struct Registration {
    id: ElementId,
    options: VisibilityOptions,
    visible: bool,
}

/// Rectangle-driven detector
#[derive(Debug, Clone)]
pub struct GeometryDetector {
    available: bool,
    registrations: Vec<Registration>,
}

impl Default for GeometryDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryDetector {
    pub fn new() -> Self {
        Self {
            available: true,
            registrations: Vec::new(),
        }
    }

    /// A detector standing in for a browser without the capability
    pub fn unavailable() -> Self {
        Self {
            available: false,
            registrations: Vec::new(),
        }
    }

    pub fn is_observing(&self, id: ElementId) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }

    pub fn observed_count(&self) -> usize {
        self.registrations.len()
    }

    /// Evaluate every registration and return, in registration order, the
    /// elements that just became sufficiently visible
    ///
    /// `rect_of` returns `None` for elements that are no longer laid out.
    pub fn update<F>(&mut self, viewport: Viewport, mut rect_of: F) -> Vec<ElementId>
    where
        F: FnMut(ElementId) -> Option<Rect>,
    {
        if !self.available {
            return Vec::new();
        }

        let mut entered = Vec::new();
        for registration in &mut self.registrations {
            let visible = rect_of(registration.id)
                .map(|rect| is_sufficiently_visible(&rect, &viewport, &registration.options))
                .unwrap_or(false);
            if visible && !registration.visible {
                entered.push(registration.id);
            }
            registration.visible = visible;
        }
        entered
    }
}

impl VisibilityDetector for GeometryDetector {
    fn is_available(&self) -> bool {
        self.available
    }

    fn observe(&mut self, id: ElementId, options: VisibilityOptions) {
        if !self.available {
            return;
        }
        match self.registrations.iter_mut().find(|r| r.id == id) {
            Some(existing) => {
                existing.options = options;
                existing.visible = false;
            }
            None => self.registrations.push(Registration {
                id,
                options,
                visible: false,
            }),
        }
    }

    fn unobserve(&mut self, id: ElementId) {
        self.registrations.retain(|r| r.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn test_ratio() {
        let half = Rect::new(0.0, 700.0, 100.0, 200.0);
        assert!((intersection_ratio(&half, &VIEWPORT, 0.0) - 0.5).abs() < 1e-9);
        assert!((intersection_ratio(&half, &VIEWPORT, 100.0) - 1.0).abs() < 1e-9);
        let below = Rect::new(0.0, 900.0, 100.0, 100.0);
        assert_eq!(intersection_ratio(&below, &VIEWPORT, 0.0), 0.0);
    }

    #[test]
    fn test_margin_detects_early() {
        let options = VisibilityOptions {
            threshold: 0.1,
            root_margin: 150.0,
        };
        let just_below = Rect::new(0.0, 850.0, 100.0, 100.0);
        assert!(is_sufficiently_visible(&just_below, &VIEWPORT, &options));
        assert!(!is_sufficiently_visible(
            &just_below,
            &VIEWPORT,
            &VisibilityOptions::default()
        ));
    }

    #[test]
    fn test_fires_once_per_transition() {
        let mut detector = GeometryDetector::new();
        let id = ElementId(1);
        detector.observe(id, VisibilityOptions::default());

        let at = |top: f64| move |_: ElementId| Some(Rect::new(0.0, top, 100.0, 100.0));
        assert!(detector.update(VIEWPORT, at(1200.0)).is_empty());
        assert_eq!(detector.update(VIEWPORT, at(300.0)), vec![id]);
        assert!(detector.update(VIEWPORT, at(300.0)).is_empty());
        assert!(detector.update(VIEWPORT, at(-500.0)).is_empty());
        assert_eq!(detector.update(VIEWPORT, at(100.0)), vec![id]);
    }

    #[test]
    fn test_unobserve_stops_tracking() {
        let mut detector = GeometryDetector::new();
        detector.observe(ElementId(1), VisibilityOptions::default());
        detector.observe(ElementId(2), VisibilityOptions::default());
        detector.unobserve(ElementId(1));
        let entered = detector.update(VIEWPORT, |_| Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(entered, vec![ElementId(2)]);
        assert!(!detector.is_observing(ElementId(1)));
    }

    #[test]
    fn test_unavailable_never_fires() {
        let mut detector = GeometryDetector::unavailable();
        assert!(!detector.is_available());
        detector.observe(ElementId(1), VisibilityOptions::default());
        assert_eq!(detector.observed_count(), 0);
        assert!(detector
            .update(VIEWPORT, |_| Some(Rect::new(0.0, 0.0, 10.0, 10.0)))
            .is_empty());
    }
}
