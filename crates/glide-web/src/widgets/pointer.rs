//! Magnetic buttons and card hover lift

use std::rc::Rc;

use glide_core::widgets::{hover_lift, MagneticButton};
use glide_core::{Error, Point, Result};
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use crate::app::App;
use crate::dom;

pub fn init_magnetic(app: &Rc<App>) -> Result<()> {
    let buttons = app.query_all(".btn-magnetic")?;
    if buttons.is_empty() {
        return Err(Error::MissingAnchor(".btn-magnetic".to_string()));
    }

    for element in buttons {
        let button = Rc::new(MagneticButton::new(
            app.register(&element)?,
            app.config.magnetic.clone(),
        ));
        {
            let (app, button, target) = (Rc::clone(app), Rc::clone(&button), element.clone());
            dom::listen(&element, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let pointer = Point::new(event.client_x() as f64, event.client_y() as f64);
                let rect = dom::rect_of(&target);
                app.tween(|tweener| button.on_pointer_move(pointer, &rect, tweener));
            })?;
        }
        let app = Rc::clone(app);
        dom::listen(&element, "mouseleave", move |_| {
            app.tween(|tweener| button.on_pointer_leave(tweener));
        })?;
    }
    Ok(())
}

pub fn init_hover_lift(app: &Rc<App>) -> Result<()> {
    let cards = app.query_all(".feature-card")?;
    if cards.is_empty() {
        return Err(Error::MissingAnchor(".feature-card".to_string()));
    }

    for card in cards {
        let id = app.register(&card)?;
        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let app = Rc::clone(app);
            dom::listen(&card, event, move |_| {
                app.tween(|tweener| hover_lift(id, hovered, &app.config.magnetic, tweener));
            })?;
        }
    }
    Ok(())
}
