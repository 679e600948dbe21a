//! Tweening through GSAP when the page loads it, CSS transitions otherwise

use glide_core::motion::EasingType;
use glide_core::tween::{TweenProps, Tweener};
use glide_core::{ElementId, Result};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Window};

use crate::dom::{JsResultExt, Registry};

/// Handle on `window.gsap`
#[derive(Debug, Clone)]
pub struct Gsap {
    gsap: JsValue,
    to: js_sys::Function,
}

impl Gsap {
    pub fn detect(window: &Window) -> Option<Self> {
        let gsap = js_sys::Reflect::get(window, &JsValue::from_str("gsap")).ok()?;
        if gsap.is_undefined() || gsap.is_null() {
            return None;
        }
        let to = js_sys::Reflect::get(&gsap, &JsValue::from_str("to"))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()?;
        Some(Self { gsap, to })
    }

    fn to(&self, element: &HtmlElement, props: &TweenProps, duration_ms: u64, easing: EasingType) -> Result<()> {
        let vars = js_sys::Object::new();
        set(&vars, "duration", JsValue::from_f64(duration_ms as f64 / 1000.0))?;
        set(&vars, "ease", JsValue::from_str(&easing.to_string()))?;
        for (key, value) in [
            ("x", props.x),
            ("y", props.y),
            ("scale", props.scale),
            ("opacity", props.opacity),
        ] {
            if let Some(value) = value {
                set(&vars, key, JsValue::from_f64(value))?;
            }
        }
        self.to.call2(&self.gsap, element, &vars).dom()?;
        Ok(())
    }
}

fn set(target: &js_sys::Object, key: &str, value: JsValue) -> Result<()> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), &value).dom()?;
    Ok(())
}

/// CSS `transition` for a tween
pub fn css_transition(duration_ms: u64, easing: EasingType) -> String {
    let timing = easing.css_timing();
    format!("transform {duration_ms}ms {timing}, opacity {duration_ms}ms {timing}")
}

fn css_to(element: &HtmlElement, props: &TweenProps, duration_ms: u64, easing: EasingType) -> Result<()> {
    let style = element.style();
    style
        .set_property("transition", &css_transition(duration_ms, easing))
        .dom()?;
    let transform = props.css_transform();
    if !transform.is_empty() {
        style.set_property("transform", &transform).dom()?;
    }
    if let Some(opacity) = props.opacity {
        style.set_property("opacity", &opacity.to_string()).dom()?;
    }
    Ok(())
}

/// Resolves ids through the registry and hands the tween to GSAP or CSS
pub struct PageTweener<'a> {
    registry: &'a Registry,
    gsap: Option<&'a Gsap>,
}

impl<'a> PageTweener<'a> {
    pub fn new(registry: &'a Registry, gsap: Option<&'a Gsap>) -> Self {
        Self { registry, gsap }
    }
}

impl Tweener for PageTweener<'_> {
    fn animate_to(&mut self, target: ElementId, props: TweenProps, duration_ms: u64, easing: EasingType) {
        let Some(element) = self.registry.get(target) else {
            debug!(%target, "Tween target is not registered");
            return;
        };
        let result = match self.gsap {
            Some(gsap) => gsap.to(element, &props, duration_ms, easing),
            None => css_to(element, &props, duration_ms, easing),
        };
        if let Err(e) = result {
            warn!(%target, error = %e, "Tween failed");
        }
    }
}
