//! DOM helpers shared by the widget bindings

use glide_core::{ElementId, Error, Rect, Result};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, MediaQueryList, NodeList, Window};

/// Attribute carrying an element's registry id
pub const ID_ATTRIBUTE: &str = "data-glide-id";

pub trait JsResultExt<T> {
    fn dom(self) -> Result<T>;
}

impl<T> JsResultExt<T> for std::result::Result<T, JsValue> {
    fn dom(self) -> Result<T> {
        self.map_err(|e| Error::Dom(describe(&e)))
    }
}

/// Human-readable text for a thrown JS value
pub fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => format!("{value:?}"),
    }
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| Error::Unavailable("window".to_string()))
}

pub fn document(window: &Window) -> Result<Document> {
    window
        .document()
        .ok_or_else(|| Error::Unavailable("document".to_string()))
}

/// First match for `selector`, or `MissingAnchor`
pub fn query(document: &Document, selector: &str) -> Result<Element> {
    document
        .query_selector(selector)
        .dom()?
        .ok_or_else(|| Error::MissingAnchor(selector.to_string()))
}

pub fn query_in(root: &Element, selector: &str) -> Result<Element> {
    root.query_selector(selector)
        .dom()?
        .ok_or_else(|| Error::MissingAnchor(selector.to_string()))
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    Ok(elements(&document.query_selector_all(selector).dom()?))
}

pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>> {
    Ok(elements(&root.query_selector_all(selector).dom()?))
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn to_html(element: &Element) -> Result<HtmlElement> {
    element
        .clone()
        .dyn_into::<HtmlElement>()
        .map_err(|_| Error::Dom(format!("<{}> is not an HTML element", element.tag_name())))
}

pub fn rect_of(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// Milliseconds since navigation start
pub fn now_ms() -> u64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now().max(0.0) as u64)
        .unwrap_or(0)
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn reduced_motion_query(window: &Window) -> Option<MediaQueryList> {
    window.match_media("(prefers-reduced-motion: reduce)").ok().flatten()
}

/// Attach a listener for the lifetime of the page
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .dom()?;
    callback.forget();
    Ok(())
}

/// Fire-once timer
pub fn set_timeout<F>(window: &Window, delay_ms: u64, f: F)
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(f);
    let delay = delay_ms.min(i32::MAX as u64) as i32;
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
    {
        warn!(error = %describe(&e), "setTimeout failed");
    }
}

/// Parse a computed pixel length such as `"24px"`
pub fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Element handles keyed by the ids the core engines work with
#[derive(Debug, Default)]
pub struct Registry {
    elements: Vec<HtmlElement>,
}

impl Registry {
    /// Register `element`, reusing its id if it already has one
    pub fn register(&mut self, element: &Element) -> Result<ElementId> {
        if let Some(id) = id_of(element) {
            if self.get(id).is_some() {
                return Ok(id);
            }
        }
        let html = to_html(element)?;
        let id = ElementId(self.elements.len() as u32);
        element.set_attribute(ID_ATTRIBUTE, &id.0.to_string()).dom()?;
        self.elements.push(html);
        Ok(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&HtmlElement> {
        self.elements.get(id.0 as usize)
    }
}

pub fn id_of(element: &Element) -> Option<ElementId> {
    element
        .get_attribute(ID_ATTRIBUTE)?
        .parse::<u32>()
        .ok()
        .map(ElementId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("24px"), 24.0);
        assert_eq!(parse_px(" 12.5px "), 12.5);
        assert_eq!(parse_px("auto"), 0.0);
    }
}
