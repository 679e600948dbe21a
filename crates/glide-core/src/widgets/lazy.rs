//! Lazy image loading
//!
//! Images carrying `data-src` get their real source once they come within
//! the root margin of the viewport. Each image loads at most once.

use tracing::debug;

use crate::config::LazyConfig;
use crate::element::ElementId;
use crate::visibility::{VisibilityDetector, VisibilityOptions};

/// The source an image should end up with, if it has one to swap in
///
/// `None` when there is no `data-src` or the image already shows it.
pub fn resolve_source<'a>(data_src: Option<&'a str>, src: Option<&str>) -> Option<&'a str> {
    let data_src = data_src.map(str::trim).filter(|s| !s.is_empty())?;
    match src {
        Some(current) if current == data_src => None,
        _ => Some(data_src),
    }
}

#[derive(Debug, Clone)]
struct LazyImage {
    id: ElementId,
    source: String,
    loaded: bool,
}

/// Source swap the host applies to an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub id: ElementId,
    pub source: String,
}

#[derive(Debug, Clone)]
pub struct LazyLoader {
    config: LazyConfig,
    images: Vec<LazyImage>,
}

impl LazyLoader {
    pub fn new(config: LazyConfig) -> Self {
        Self {
            config,
            images: Vec::new(),
        }
    }

    /// Register an image; returns false when it has nothing to load
    pub fn track(&mut self, id: ElementId, data_src: Option<&str>, src: Option<&str>) -> bool {
        let Some(source) = resolve_source(data_src, src) else {
            return false;
        };
        if self.images.iter().any(|image| image.id == id) {
            return false;
        }
        self.images.push(LazyImage {
            id,
            source: source.to_string(),
            loaded: false,
        });
        true
    }

    pub fn options(&self) -> VisibilityOptions {
        VisibilityOptions {
            threshold: 0.0,
            root_margin: self.config.root_margin_px,
        }
    }

    /// Observe every tracked image, or load them all now without a detector
    pub fn start<D>(&mut self, detector: &mut D) -> Vec<LoadRequest>
    where
        D: VisibilityDetector + ?Sized,
    {
        if !detector.is_available() {
            debug!(count = self.images.len(), "Loading lazy images eagerly");
            let ids: Vec<_> = self.images.iter().map(|image| image.id).collect();
            return ids
                .into_iter()
                .filter_map(|id| self.load(id, detector))
                .collect();
        }

        let options = self.options();
        for image in self.images.iter().filter(|image| !image.loaded) {
            detector.observe(image.id, options);
        }
        Vec::new()
    }

    /// Detector callback
    pub fn on_visible<D>(&mut self, id: ElementId, detector: &mut D) -> Option<LoadRequest>
    where
        D: VisibilityDetector + ?Sized,
    {
        self.load(id, detector)
    }

    pub fn is_loaded(&self, id: ElementId) -> bool {
        self.images.iter().any(|image| image.id == id && image.loaded)
    }

    pub fn pending_count(&self) -> usize {
        self.images.iter().filter(|image| !image.loaded).count()
    }

    fn load<D>(&mut self, id: ElementId, detector: &mut D) -> Option<LoadRequest>
    where
        D: VisibilityDetector + ?Sized,
    {
        let image = self.images.iter_mut().find(|image| image.id == id)?;
        if image.loaded {
            return None;
        }
        image.loaded = true;
        detector.unobserve(id);
        Some(LoadRequest {
            id,
            source: image.source.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Rect, Viewport};
    use crate::visibility::GeometryDetector;

    #[test]
    fn test_resolve_source() {
        assert_eq!(resolve_source(Some("a.jpg"), None), Some("a.jpg"));
        assert_eq!(resolve_source(Some("a.jpg"), Some("blur.jpg")), Some("a.jpg"));
        assert_eq!(resolve_source(Some("a.jpg"), Some("a.jpg")), None);
        assert_eq!(resolve_source(Some("  "), None), None);
        assert_eq!(resolve_source(None, Some("a.jpg")), None);
    }

    #[test]
    fn test_loads_once_within_margin() {
        let mut loader = LazyLoader::new(LazyConfig::default());
        let mut detector = GeometryDetector::new();
        assert!(loader.track(ElementId(1), Some("hero.jpg"), None));
        assert!(loader.start(&mut detector).is_empty());

        let viewport = Viewport::new(1000.0, 800.0);
        // 150px below the fold, inside the 200px margin
        let entered = detector.update(viewport, |_| Some(Rect::new(0.0, 950.0, 100.0, 100.0)));
        assert_eq!(entered, vec![ElementId(1)]);

        let request = loader.on_visible(ElementId(1), &mut detector).unwrap();
        assert_eq!(request.source, "hero.jpg");
        assert!(!detector.is_observing(ElementId(1)));
        assert_eq!(loader.on_visible(ElementId(1), &mut detector), None);
        assert!(loader.is_loaded(ElementId(1)));
    }

    #[test]
    fn test_eager_fallback() {
        let mut loader = LazyLoader::new(LazyConfig::default());
        loader.track(ElementId(1), Some("a.jpg"), None);
        loader.track(ElementId(2), Some("b.jpg"), None);
        let requests = loader.start(&mut GeometryDetector::unavailable());
        assert_eq!(requests.len(), 2);
        assert_eq!(loader.pending_count(), 0);
    }

    #[test]
    fn test_duplicate_track_ignored() {
        let mut loader = LazyLoader::new(LazyConfig::default());
        assert!(loader.track(ElementId(1), Some("a.jpg"), None));
        assert!(!loader.track(ElementId(1), Some("a.jpg"), None));
        assert!(!loader.track(ElementId(2), None, None));
    }
}
