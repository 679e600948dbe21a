//! Injected tweening capability
//!
//! Secondary effects (cursor follower, card lift, magnetic offset, carousel
//! slide) are interpolated by an external tweening library. The engines only
//! say where an element should end up and with which curve.

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::motion::EasingType;

/// Properties a tween drives; `None` leaves the property alone
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TweenProps {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
    pub opacity: Option<f64>,
}

impl TweenProps {
    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn translate_x(x: f64) -> Self {
        Self {
            x: Some(x),
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// CSS `transform` equivalent of the translate/scale part
    pub fn css_transform(&self) -> String {
        let mut parts = Vec::new();
        if self.x.is_some() || self.y.is_some() {
            parts.push(format!(
                "translate({}px, {}px)",
                self.x.unwrap_or(0.0),
                self.y.unwrap_or(0.0)
            ));
        }
        if let Some(scale) = self.scale {
            parts.push(format!("scale({})", scale));
        }
        parts.join(" ")
    }
}

/// A single `animate_to` call, kept for replay or inspection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TweenRequest {
    pub target: ElementId,
    pub props: TweenProps,
    pub duration_ms: u64,
    pub easing: EasingType,
}

/// Tweening capability supplied by the host page
pub trait Tweener {
    fn animate_to(&mut self, target: ElementId, props: TweenProps, duration_ms: u64, easing: EasingType);
}

/// Collects requests instead of animating
///
/// Used by the CLI's simulations and by tests.
#[derive(Debug, Clone, Default)]
pub struct TweenLog {
    pub requests: Vec<TweenRequest>,
}

impl TweenLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&TweenRequest> {
        self.requests.last()
    }
}

impl Tweener for TweenLog {
    fn animate_to(&mut self, target: ElementId, props: TweenProps, duration_ms: u64, easing: EasingType) {
        self.requests.push(TweenRequest {
            target,
            props,
            duration_ms,
            easing,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_transform() {
        assert_eq!(TweenProps::translate(4.0, -2.5).css_transform(), "translate(4px, -2.5px)");
        assert_eq!(
            TweenProps::translate(0.0, -15.0).with_scale(1.03).css_transform(),
            "translate(0px, -15px) scale(1.03)"
        );
        assert_eq!(TweenProps::default().with_opacity(1.0).css_transform(), "");
    }

    #[test]
    fn test_log_records_requests() {
        let mut log = TweenLog::new();
        log.animate_to(ElementId(3), TweenProps::translate_x(-200.0), 600, EasingType::Power2Out);
        let last = log.last().unwrap();
        assert_eq!(last.target, ElementId(3));
        assert_eq!(last.props.x, Some(-200.0));
        assert_eq!(last.easing, EasingType::Power2Out);
    }
}
