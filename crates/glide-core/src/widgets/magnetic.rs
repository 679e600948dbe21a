//! Magnetic buttons and card hover lift

use crate::config::MagneticConfig;
use crate::element::{ElementId, Point, Rect};
use crate::tween::{TweenProps, Tweener};

/// Offset toward the pointer, `strength` times its distance from the centre
pub fn magnetic_offset(pointer: Point, rect: &Rect, strength: f64) -> Point {
    let center = rect.center();
    Point::new((pointer.x - center.x) * strength, (pointer.y - center.y) * strength)
}

#[derive(Debug, Clone)]
pub struct MagneticButton {
    id: ElementId,
    config: MagneticConfig,
}

impl MagneticButton {
    pub fn new(id: ElementId, config: MagneticConfig) -> Self {
        Self { id, config }
    }

    /// Pull the button toward the pointer; returns the offset, `None` when
    /// the pointer is outside the button
    pub fn on_pointer_move<T>(&self, pointer: Point, rect: &Rect, tweener: &mut T) -> Option<Point>
    where
        T: Tweener + ?Sized,
    {
        if !rect.contains(pointer) {
            return None;
        }
        let offset = magnetic_offset(pointer, rect, self.config.strength);
        tweener.animate_to(
            self.id,
            TweenProps::translate(offset.x, offset.y),
            self.config.duration_ms,
            self.config.easing,
        );
        Some(offset)
    }

    /// Spring back to rest with an elastic overshoot
    pub fn on_pointer_leave<T>(&self, tweener: &mut T)
    where
        T: Tweener + ?Sized,
    {
        tweener.animate_to(
            self.id,
            TweenProps::translate(0.0, 0.0),
            self.config.duration_ms,
            self.config.release_easing,
        );
    }
}

/// Lift a card on hover and settle it on leave
pub fn hover_lift<T>(id: ElementId, hovered: bool, config: &MagneticConfig, tweener: &mut T)
where
    T: Tweener + ?Sized,
{
    let props = if hovered {
        TweenProps::translate(0.0, config.hover_lift).with_scale(config.hover_scale)
    } else {
        TweenProps::translate(0.0, 0.0).with_scale(1.0)
    };
    tweener.animate_to(id, props, config.hover_duration_ms, config.easing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::EasingType;
    use crate::tween::TweenLog;

    fn button() -> MagneticButton {
        MagneticButton::new(ElementId(1), MagneticConfig::default())
    }

    #[test]
    fn test_offset_is_damped_distance() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        let offset = magnetic_offset(Point::new(250.0, 110.0), &rect, 0.2);
        assert!((offset.x - 10.0).abs() < 1e-9);
        assert!((offset.y + 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_move_inside_tweens() {
        let mut log = TweenLog::new();
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let offset = button()
            .on_pointer_move(Point::new(100.0, 25.0), &rect, &mut log)
            .unwrap();
        assert!((offset.x - 10.0).abs() < 1e-9);
        assert_eq!(offset.y, 0.0);
        let request = log.last().unwrap();
        assert_eq!(request.easing, EasingType::Power2Out);
        assert_eq!(request.duration_ms, 800);
    }

    #[test]
    fn test_move_outside_ignored() {
        let mut log = TweenLog::new();
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(button()
            .on_pointer_move(Point::new(150.0, 25.0), &rect, &mut log)
            .is_none());
        assert!(log.requests.is_empty());
    }

    #[test]
    fn test_leave_springs_back_elastically() {
        let mut log = TweenLog::new();
        button().on_pointer_leave(&mut log);
        let request = log.last().unwrap();
        assert_eq!(request.props, TweenProps::translate(0.0, 0.0));
        assert_eq!(
            request.easing,
            EasingType::ElasticOut {
                amplitude: 1.0,
                period: 0.5
            }
        );
    }

    #[test]
    fn test_hover_lift() {
        let mut log = TweenLog::new();
        let config = MagneticConfig::default();
        hover_lift(ElementId(2), true, &config, &mut log);
        hover_lift(ElementId(2), false, &config, &mut log);
        assert_eq!(log.requests[0].props.y, Some(-15.0));
        assert_eq!(log.requests[0].props.scale, Some(1.03));
        assert_eq!(log.requests[1].props.scale, Some(1.0));
    }
}
