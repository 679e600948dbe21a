//! `requestAnimationFrame`-backed frame scheduling and the write context

use std::cell::RefCell;
use std::rc::Rc;

use glide_core::frame::FrameScheduler;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Window};

use crate::dom::{describe, JsResultExt};

type FrameCallback = Closure<dyn FnMut(f64)>;

pub struct RafScheduler {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Set the function run on every requested frame
    pub fn install<F>(&self, on_frame: F)
    where
        F: FnMut(f64) + 'static,
    {
        *self.callback.borrow_mut() = Some(Closure::wrap(Box::new(on_frame) as Box<dyn FnMut(f64)>));
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self) {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            warn!("Frame requested before a frame callback was installed");
            return;
        };
        if let Err(e) = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            warn!(error = %describe(&e), "requestAnimationFrame failed");
        }
    }
}

/// What batched writes operate on
///
/// Writes cannot fail the frame, so problems are logged and the next write
/// still runs.
pub struct Dom {
    window: Window,
}

impl Dom {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.window.scroll_to_with_x_and_y(0.0, offset);
    }

    pub fn set_class(&mut self, element: &Element, class: &str, on: bool) {
        if let Err(e) = element.class_list().toggle_with_force(class, on).dom() {
            warn!(class, error = %e, "Class update failed");
        }
    }

    pub fn set_style(&mut self, element: &HtmlElement, property: &str, value: &str) {
        if let Err(e) = element.style().set_property(property, value).dom() {
            warn!(property, error = %e, "Style update failed");
        }
    }

    pub fn set_text(&mut self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    pub fn set_attribute(&mut self, element: &Element, name: &str, value: &str) {
        if let Err(e) = element.set_attribute(name, value).dom() {
            warn!(attribute = name, error = %e, "Attribute update failed");
        }
    }

    pub fn set_disabled(&mut self, element: &Element, disabled: bool) {
        let result = if disabled {
            element.set_attribute("disabled", "")
        } else {
            element.remove_attribute("disabled")
        };
        if let Err(e) = result.dom() {
            warn!(error = %e, "Attribute update failed");
        }
    }

    pub fn remove(&mut self, element: &Element) {
        element.remove();
    }
}
