//! `IntersectionObserver`-backed visibility detection

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glide_core::visibility::{VisibilityDetector, VisibilityOptions};
use glide_core::ElementId;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use crate::app::App;
use crate::dom::{self, describe};

type Handler = Rc<dyn Fn(ElementId)>;
type EntriesCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Whether the browser exposes `IntersectionObserver`
pub fn is_supported(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// `rootMargin` growing the viewport vertically only
pub fn root_margin(px: f64) -> String {
    format!("{px}px 0px")
}

struct Observer {
    options: VisibilityOptions,
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

/// One observer per distinct option set; each registration reports through
/// the handler installed with `on_visible`
pub struct ObserverDetector {
    app: Rc<App>,
    available: bool,
    handler: Rc<RefCell<Option<Handler>>>,
    observers: Vec<Observer>,
    watching: HashMap<ElementId, usize>,
}

impl ObserverDetector {
    pub fn new(app: Rc<App>) -> Self {
        let available = is_supported(&app.window);
        if !available {
            debug!("IntersectionObserver unavailable");
        }
        Self {
            app,
            available,
            handler: Rc::new(RefCell::new(None)),
            observers: Vec::new(),
            watching: HashMap::new(),
        }
    }

    /// Handler called for each element that became sufficiently visible
    ///
    /// Runs from the observer callback, never while the detector is borrowed.
    pub fn on_visible<F>(&mut self, handler: F)
    where
        F: Fn(ElementId) + 'static,
    {
        *self.handler.borrow_mut() = Some(Rc::new(handler));
    }

    fn observer_for(&mut self, options: VisibilityOptions) -> Option<usize> {
        if let Some(index) = self.observers.iter().position(|o| o.options == options) {
            return Some(index);
        }

        let handler = Rc::clone(&self.handler);
        let threshold = options.threshold;
        let callback: EntriesCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let Some(handler) = handler.borrow().clone() else {
                    return;
                };
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() || entry.intersection_ratio() < threshold {
                        continue;
                    }
                    if let Some(id) = dom::id_of(&entry.target()) {
                        handler(id);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&root_margin(options.root_margin));
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                warn!(error = %describe(&e), "Could not create IntersectionObserver");
                return None;
            }
        };
        self.observers.push(Observer {
            options,
            observer,
            _callback: callback,
        });
        Some(self.observers.len() - 1)
    }
}

impl VisibilityDetector for ObserverDetector {
    fn is_available(&self) -> bool {
        self.available
    }

    fn observe(&mut self, id: ElementId, options: VisibilityOptions) {
        if !self.available {
            return;
        }
        let Some(index) = self.observer_for(options) else {
            return;
        };
        let registry = self.app.registry.borrow();
        let Some(element) = registry.get(id) else {
            debug!(%id, "Observed element is not registered");
            return;
        };
        self.observers[index].observer.observe(element);
        self.watching.insert(id, index);
    }

    fn unobserve(&mut self, id: ElementId) {
        let Some(index) = self.watching.remove(&id) else {
            return;
        };
        if let Some(element) = self.app.registry.borrow().get(id) {
            self.observers[index].observer.unobserve(element);
        }
    }
}
