use std::rc::Rc;

use glide_core::frame::FrameKey;
use glide_core::widgets::parallax::parse_speed;
use glide_core::widgets::parallax_offset;
use glide_core::{ElementId, Error, Result};
use tracing::warn;
use web_sys::HtmlElement;

use crate::app::App;
use crate::dom;

pub fn init(app: &Rc<App>) -> Result<()> {
    let mut layers: Vec<(ElementId, HtmlElement, f64)> = Vec::new();
    for element in app.query_all("[data-speed]")? {
        let speed = match parse_speed(
            element.get_attribute("data-speed").as_deref(),
            app.config.parallax.default_speed,
        ) {
            Ok(speed) => speed,
            Err(e) => {
                warn!(error = %e, "Skipping parallax layer");
                continue;
            }
        };
        layers.push((app.register(&element)?, dom::to_html(&element)?, speed));
    }
    if layers.is_empty() {
        return Err(Error::MissingAnchor("[data-speed]".to_string()));
    }

    let handle = Rc::clone(app);
    let window = app.window.clone();
    dom::listen(&window, "scroll", move |_| {
        let scroll = dom::scroll_y(&handle.window);
        for (id, layer, speed) in &layers {
            let offset = parallax_offset(scroll, *speed);
            let layer = layer.clone();
            handle.schedule_keyed(FrameKey::element("parallax", *id), move |dom| {
                dom.set_style(&layer, "transform", &format!("translateY({offset}px)"));
            });
        }
    })
}
