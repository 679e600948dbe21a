//! Scroll-triggered reveal
//!
//! Every animatable element starts PENDING (transparent, pushed down) and is
//! flipped to REVEALED the first time the visibility detector reports it.
//! The flip happens once per element and never goes back. A safety-net
//! deadline reveals anything still pending so content is never left hidden
//! by a detector that misbehaves.

use tracing::{debug, warn};

use crate::config::RevealConfig;
use crate::element::ElementId;
use crate::visibility::{VisibilityDetector, VisibilityOptions};

/// Structural classes that opt an element into reveal animations
pub const ANIMATABLE_CLASSES: &[&str] = &[
    "animate-on-scroll",
    "feature-card",
    "process-item",
    "testimonial-card",
    "section-title",
    "stat-item",
];

/// CSS selector matching every animatable element, `data-animate` included
pub fn animatable_selector() -> String {
    ANIMATABLE_CLASSES
        .iter()
        .map(|class| format!(".{class}"))
        .chain(std::iter::once("[data-animate]".to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// Inline style for one visual state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub opacity: f64,
    pub translate_y: f64,
    pub transition_ms: u64,
    pub delay_ms: u64,
}

impl RevealStyle {
    pub fn css_transform(&self) -> String {
        format!("translateY({}px)", self.translate_y)
    }

    pub fn css_transition(&self) -> String {
        format!(
            "opacity {ms}ms ease-out {delay}ms, transform {ms}ms ease-out {delay}ms",
            ms = self.transition_ms,
            delay = self.delay_ms
        )
    }
}

/// Style the host must apply to an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleChange {
    pub id: ElementId,
    pub state: RevealState,
    pub style: RevealStyle,
}

#[derive(Debug, Clone)]
struct TrackedElement {
    id: ElementId,
    state: RevealState,
    index: usize,
}

/// Owns the reveal lifecycle of every animatable element on the page
#[derive(Debug, Clone)]
pub struct RevealOrchestrator {
    config: RevealConfig,
    elements: Vec<TrackedElement>,
    safety_deadline: Option<u64>,
    safety_fired: bool,
}

impl RevealOrchestrator {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
            safety_deadline: None,
            safety_fired: false,
        }
    }

    /// Register an element found by the page scan; scan order drives the stagger
    pub fn track(&mut self, id: ElementId) {
        if self.elements.iter().any(|e| e.id == id) {
            return;
        }
        let index = self.elements.len();
        self.elements.push(TrackedElement {
            id,
            state: RevealState::Pending,
            index,
        });
    }

    pub fn options(&self) -> VisibilityOptions {
        VisibilityOptions {
            threshold: self.config.threshold,
            root_margin: self.config.root_margin_px,
        }
    }

    /// Apply the pending style and start observing; arms the safety net
    ///
    /// Without a detector capability every element is revealed on the spot.
    pub fn start<D>(&mut self, detector: &mut D, now_ms: u64) -> Vec<StyleChange>
    where
        D: VisibilityDetector + ?Sized,
    {
        if !detector.is_available() {
            debug!(
                count = self.elements.len(),
                "Visibility detection unavailable, revealing everything"
            );
            self.safety_fired = true;
            return self.reveal_pending(detector);
        }

        let options = self.options();
        let mut changes = Vec::with_capacity(self.elements.len());
        for element in &self.elements {
            if element.state != RevealState::Pending {
                continue;
            }
            changes.push(StyleChange {
                id: element.id,
                state: RevealState::Pending,
                style: self.pending_style(element.index),
            });
            detector.observe(element.id, options);
        }
        self.safety_deadline = Some(now_ms + self.config.safety_net_ms);
        changes
    }

    /// Detector callback: first visibility reveals, anything later is ignored
    pub fn on_visible<D>(&mut self, id: ElementId, detector: &mut D) -> Option<StyleChange>
    where
        D: VisibilityDetector + ?Sized,
    {
        let element = self.elements.iter_mut().find(|e| e.id == id)?;
        if element.state == RevealState::Revealed {
            return None;
        }
        element.state = RevealState::Revealed;
        let index = element.index;
        detector.unobserve(id);
        Some(StyleChange {
            id,
            state: RevealState::Revealed,
            style: self.revealed_style(index),
        })
    }

    /// Fire the safety net once its deadline has passed
    pub fn tick<D>(&mut self, now_ms: u64, detector: &mut D) -> Vec<StyleChange>
    where
        D: VisibilityDetector + ?Sized,
    {
        match self.safety_deadline {
            Some(deadline) if !self.safety_fired && now_ms >= deadline => {
                self.safety_fired = true;
                let changes = self.reveal_pending(detector);
                if !changes.is_empty() {
                    warn!(
                        count = changes.len(),
                        "Reveal safety net fired for elements the detector never reported"
                    );
                }
                changes
            }
            _ => Vec::new(),
        }
    }

    /// Milliseconds from `now_ms` until the safety net is due
    pub fn safety_net_due_in(&self, now_ms: u64) -> Option<u64> {
        if self.safety_fired {
            return None;
        }
        self.safety_deadline.map(|d| d.saturating_sub(now_ms))
    }

    pub fn state(&self, id: ElementId) -> Option<RevealState> {
        self.elements.iter().find(|e| e.id == id).map(|e| e.state)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.count(RevealState::Pending)
    }

    pub fn revealed_count(&self) -> usize {
        self.count(RevealState::Revealed)
    }

    fn count(&self, state: RevealState) -> usize {
        self.elements.iter().filter(|e| e.state == state).count()
    }

    fn reveal_pending<D>(&mut self, detector: &mut D) -> Vec<StyleChange>
    where
        D: VisibilityDetector + ?Sized,
    {
        let mut changes = Vec::new();
        for element in &mut self.elements {
            if element.state == RevealState::Pending {
                element.state = RevealState::Revealed;
                detector.unobserve(element.id);
                changes.push((element.id, element.index));
            }
        }
        changes
            .into_iter()
            .map(|(id, index)| StyleChange {
                id,
                state: RevealState::Revealed,
                style: self.revealed_style(index),
            })
            .collect()
    }

    fn delay_for(&self, index: usize) -> u64 {
        (index as u64)
            .saturating_mul(self.config.stagger_ms)
            .min(self.config.max_stagger_ms)
    }

    fn pending_style(&self, index: usize) -> RevealStyle {
        RevealStyle {
            opacity: 0.0,
            translate_y: self.config.offset_y,
            transition_ms: self.config.transition_ms,
            delay_ms: self.delay_for(index),
        }
    }

    fn revealed_style(&self, index: usize) -> RevealStyle {
        RevealStyle {
            opacity: 1.0,
            translate_y: 0.0,
            transition_ms: self.config.transition_ms,
            delay_ms: self.delay_for(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Rect, Viewport};
    use crate::visibility::GeometryDetector;

    fn orchestrator(count: u32) -> RevealOrchestrator {
        let mut reveal = RevealOrchestrator::new(RevealConfig::default());
        for i in 0..count {
            reveal.track(ElementId(i));
        }
        reveal
    }

    #[test]
    fn test_selector_covers_attribute() {
        let selector = animatable_selector();
        assert!(selector.starts_with(".animate-on-scroll, .feature-card"));
        assert!(selector.ends_with(", [data-animate]"));
    }

    #[test]
    fn test_start_sets_pending_style() {
        let mut reveal = orchestrator(3);
        let mut detector = GeometryDetector::new();
        let changes = reveal.start(&mut detector, 0);

        assert_eq!(changes.len(), 3);
        assert!(changes.iter().all(|c| c.state == RevealState::Pending));
        assert_eq!(changes[0].style.opacity, 0.0);
        assert_eq!(changes[0].style.translate_y, 30.0);
        assert_eq!(changes[2].style.delay_ms, 300);
        assert_eq!(detector.observed_count(), 3);
    }

    #[test]
    fn test_reveal_exactly_once() {
        let mut reveal = orchestrator(2);
        let mut detector = GeometryDetector::new();
        reveal.start(&mut detector, 0);

        let change = reveal.on_visible(ElementId(1), &mut detector).unwrap();
        assert_eq!(change.state, RevealState::Revealed);
        assert_eq!(change.style.opacity, 1.0);
        assert_eq!(change.style.translate_y, 0.0);
        assert!(!detector.is_observing(ElementId(1)));

        assert!(reveal.on_visible(ElementId(1), &mut detector).is_none());
        assert_eq!(reveal.state(ElementId(1)), Some(RevealState::Revealed));
        assert_eq!(reveal.revealed_count(), 1);
    }

    #[test]
    fn test_never_regresses() {
        let mut reveal = orchestrator(1);
        let mut detector = GeometryDetector::new();
        reveal.start(&mut detector, 0);
        reveal.on_visible(ElementId(0), &mut detector);

        // Scrolling away and back produces no further changes
        let viewport = Viewport::new(1000.0, 800.0);
        detector.update(viewport, |_| Some(Rect::new(0.0, 5000.0, 10.0, 10.0)));
        detector.update(viewport, |_| Some(Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(reveal.tick(10_000, &mut detector).is_empty());
        assert_eq!(reveal.state(ElementId(0)), Some(RevealState::Revealed));
    }

    #[test]
    fn test_unavailable_detector_reveals_everything() {
        let mut reveal = orchestrator(4);
        let mut detector = GeometryDetector::unavailable();
        let changes = reveal.start(&mut detector, 0);

        assert_eq!(changes.len(), 4);
        assert!(changes.iter().all(|c| c.state == RevealState::Revealed));
        assert_eq!(reveal.pending_count(), 0);
        assert_eq!(reveal.safety_net_due_in(0), None);
    }

    #[test]
    fn test_safety_net_reveals_leftovers_once() {
        let mut reveal = orchestrator(3);
        let mut detector = GeometryDetector::new();
        reveal.start(&mut detector, 1000);
        reveal.on_visible(ElementId(0), &mut detector);

        assert!(reveal.tick(3999, &mut detector).is_empty());
        assert_eq!(reveal.safety_net_due_in(3999), Some(1));

        let forced = reveal.tick(4000, &mut detector);
        let ids: Vec<_> = forced.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![ElementId(1), ElementId(2)]);
        assert_eq!(detector.observed_count(), 0);
        assert!(reveal.tick(9000, &mut detector).is_empty());
        assert_eq!(reveal.revealed_count(), 3);
    }

    #[test]
    fn test_detector_driven_flow() {
        let mut reveal = orchestrator(2);
        let mut detector = GeometryDetector::new();
        reveal.start(&mut detector, 0);

        let viewport = Viewport::new(1000.0, 800.0);
        let rects = [Rect::new(0.0, 200.0, 300.0, 200.0), Rect::new(0.0, 2000.0, 300.0, 200.0)];
        for id in detector.update(viewport, |id| rects.get(id.0 as usize).copied()) {
            reveal.on_visible(id, &mut detector);
        }
        assert_eq!(reveal.state(ElementId(0)), Some(RevealState::Revealed));
        assert_eq!(reveal.state(ElementId(1)), Some(RevealState::Pending));
    }

    #[test]
    fn test_stagger_capped() {
        let reveal = orchestrator(10);
        assert_eq!(reveal.delay_for(9), 600);
        assert_eq!(
            reveal.revealed_style(1).css_transition(),
            "opacity 800ms ease-out 150ms, transform 800ms ease-out 150ms"
        );
    }
}
