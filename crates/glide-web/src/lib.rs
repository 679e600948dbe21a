//! Browser bindings for the glide page controller
//!
//! Compiled to WASM via wasm-bindgen. The page calls `start` once, optionally
//! with a JSON configuration; every widget is then wired to the DOM and
//! driven by the headless engines in `glide-core`.

use wasm_bindgen::prelude::*;

mod app;
mod dom;
mod logging;
mod observer;
mod scheduler;
mod tween;
mod widgets;

use glide_core::AppConfig;
use tracing::{error, info};

use crate::app::App;

/// Entry point; runs as soon as the document has been parsed
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => AppConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => AppConfig::default(),
    };
    logging::init(&config.general.log_level);

    let window = dom::window().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let document = dom::document(&window).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let ready_state = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string());

    if ready_state.as_deref() == Some("loading") {
        let mut pending = Some(config);
        dom::listen(&document, "DOMContentLoaded", move |_| {
            if let Some(config) = pending.take() {
                launch(config);
            }
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    } else {
        launch(config);
    }
    Ok(())
}

fn launch(config: AppConfig) {
    match App::new(config) {
        Ok(app) => {
            let report = app.start();
            if report.core_failed() {
                error!("Core interactions are degraded");
            } else {
                info!(steps = report.steps.len(), "glide started");
            }
        }
        Err(e) => error!(error = %e, "Could not start"),
    }
}
