//! Scroll progress bar and back-to-top button

/// Percentage of the scrollable distance already covered, 0-100
pub fn progress_percent(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Whether the back-to-top button should show
#[inline]
pub fn back_to_top_visible(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        assert_eq!(progress_percent(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(progress_percent(1000.0, 3000.0, 1000.0), 50.0);
        assert_eq!(progress_percent(2500.0, 3000.0, 1000.0), 100.0);
    }

    #[test]
    fn test_unscrollable_page() {
        assert_eq!(progress_percent(0.0, 800.0, 800.0), 0.0);
        assert_eq!(progress_percent(0.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn test_back_to_top() {
        assert!(!back_to_top_visible(300.0, 300.0));
        assert!(back_to_top_visible(301.0, 300.0));
    }
}
