//! Custom cursor: a dot pinned to the pointer and a trailing follower

use crate::config::CursorConfig;
use crate::element::{ElementId, Point};
use crate::tween::{TweenProps, Tweener};

/// Classes toggled while hovering an interactive element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorView {
    /// `cursor-active` on the dot
    pub dot_active: bool,
    /// `cursor-follower-active` on the follower
    pub follower_active: bool,
}

#[derive(Debug, Clone)]
pub struct CustomCursor {
    follower: ElementId,
    config: CursorConfig,
    position: Point,
    view: CursorView,
}

impl CustomCursor {
    pub fn new(follower: ElementId, config: CursorConfig) -> Self {
        Self {
            follower,
            config,
            position: Point::ORIGIN,
            view: CursorView::default(),
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn view(&self) -> CursorView {
        self.view
    }

    /// Pointer move: returns where the dot goes; the follower is tweened there
    pub fn on_pointer_move<T>(&mut self, pointer: Point, tweener: &mut T) -> Point
    where
        T: Tweener + ?Sized,
    {
        self.position = pointer;
        tweener.animate_to(
            self.follower,
            TweenProps::translate(pointer.x, pointer.y),
            self.config.follower_duration_ms,
            self.config.easing,
        );
        pointer
    }

    /// Enter/leave of an interactive element; `Some` when the classes change
    pub fn set_hover(&mut self, hovered: bool) -> Option<CursorView> {
        if self.view.dot_active == hovered {
            return None;
        }
        self.view = CursorView {
            dot_active: hovered,
            follower_active: hovered,
        };
        Some(self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::EasingType;
    use crate::tween::TweenLog;

    #[test]
    fn test_dot_follows_and_follower_tweens() {
        let mut cursor = CustomCursor::new(ElementId(3), CursorConfig::default());
        let mut log = TweenLog::new();
        let dot = cursor.on_pointer_move(Point::new(120.0, 48.0), &mut log);
        assert_eq!(dot, Point::new(120.0, 48.0));
        assert_eq!(cursor.position(), dot);

        let request = log.last().unwrap();
        assert_eq!(request.target, ElementId(3));
        assert_eq!(request.props, TweenProps::translate(120.0, 48.0));
        assert_eq!(request.duration_ms, 600);
        assert_eq!(request.easing, EasingType::Power2Out);
    }

    #[test]
    fn test_hover_toggles_both_classes() {
        let mut cursor = CustomCursor::new(ElementId(3), CursorConfig::default());
        let view = cursor.set_hover(true).unwrap();
        assert!(view.dot_active && view.follower_active);
        assert_eq!(cursor.set_hover(true), None);
        assert_eq!(cursor.set_hover(false), Some(CursorView::default()));
    }
}
