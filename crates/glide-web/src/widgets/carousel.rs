use std::cell::RefCell;
use std::rc::Rc;

use glide_core::frame::FrameKey;
use glide_core::widgets::Carousel;
use glide_core::{ElementId, Error, Result};
use wasm_bindgen::JsCast;
use web_sys::{Element, TouchEvent};

use crate::app::App;
use crate::dom;

const BUTTONS_KEY: FrameKey = FrameKey::channel("carousel-buttons");

#[derive(Clone)]
struct SliderParts {
    track: ElementId,
    first_card: Element,
    prev: Option<Element>,
    next: Option<Element>,
}

pub fn init(app: &Rc<App>) -> Result<()> {
    let slider = app.query(".testimonials-slider")?;
    let track = dom::query_in(&slider, ".testimonial-track")?;
    let cards = dom::query_all_in(&slider, ".testimonial-card")?;
    let first_card = cards
        .first()
        .cloned()
        .ok_or_else(|| Error::MissingAnchor(".testimonial-card".to_string()))?;
    let carousel = Carousel::new(app.config.carousel.clone(), cards.len())
        .ok_or_else(|| Error::MissingAnchor(".testimonial-card".to_string()))?;
    let carousel = Rc::new(RefCell::new(carousel));

    let parts = SliderParts {
        track: app.register(&track)?,
        first_card,
        prev: dom::query_in(&slider, ".slider-prev").ok(),
        next: dom::query_in(&slider, ".slider-next").ok(),
    };
    update(app, &carousel, &parts);

    let buttons = [(parts.prev.clone(), false), (parts.next.clone(), true)];
    for (button, forward) in buttons {
        let Some(button) = button else {
            continue;
        };
        let (app, carousel, parts) = (Rc::clone(app), Rc::clone(&carousel), parts.clone());
        dom::listen(&button, "click", move |_| {
            let moved = if forward {
                carousel.borrow_mut().next()
            } else {
                carousel.borrow_mut().prev()
            };
            if moved {
                update(&app, &carousel, &parts);
            }
        })?;
    }

    {
        let carousel = Rc::clone(&carousel);
        dom::listen(&track, "touchstart", move |event| {
            if let Some(x) = touch_x(&event) {
                carousel.borrow_mut().touch_start(x);
            }
        })?;
    }
    {
        let (app, carousel) = (Rc::clone(app), Rc::clone(&carousel));
        dom::listen(&track, "touchend", move |event| {
            let Some(x) = touch_x(&event) else {
                return;
            };
            let moved = carousel.borrow_mut().touch_end(x);
            if moved {
                update(&app, &carousel, &parts);
            }
        })?;
    }
    Ok(())
}

fn touch_x(event: &web_sys::Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(touch.screen_x() as f64)
}

/// Card width plus its right margin
fn card_width(app: &App, card: &Element) -> f64 {
    let margin = app
        .window
        .get_computed_style(card)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("margin-right").ok())
        .map(|value| dom::parse_px(&value))
        .unwrap_or(0.0);
    dom::rect_of(card).width + margin
}

fn update(app: &App, carousel: &Rc<RefCell<Carousel>>, parts: &SliderParts) {
    let width = card_width(app, &parts.first_card);
    let carousel = carousel.borrow();
    app.tween(|tweener| carousel.animate_track(parts.track, width, tweener));

    let (prev_disabled, next_disabled) = (carousel.prev_disabled(), carousel.next_disabled());
    let (prev, next) = (parts.prev.clone(), parts.next.clone());
    app.schedule_keyed(BUTTONS_KEY, move |dom| {
        if let Some(prev) = &prev {
            dom.set_disabled(prev, prev_disabled);
        }
        if let Some(next) = &next {
            dom.set_disabled(next, next_disabled);
        }
    });
}
