use std::cell::RefCell;
use std::rc::Rc;

use glide_core::frame::FrameKey;
use glide_core::widgets::{CursorView, CustomCursor};
use glide_core::{Point, Result};
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};

use crate::app::App;
use crate::dom;

const DOT_KEY: FrameKey = FrameKey::channel("cursor");
const HOVER_KEY: FrameKey = FrameKey::channel("cursor-hover");

/// Elements that light the cursor up
const HOVER_TARGETS: &str = "a, button, .btn, [data-cursor-hover]";

pub fn init(app: &Rc<App>) -> Result<()> {
    let dot = dom::to_html(&app.query(".custom-cursor")?)?;
    let follower = app.query(".cursor-follower")?;
    let follower_id = app.register(&follower)?;
    let cursor = Rc::new(RefCell::new(CustomCursor::new(
        follower_id,
        app.config.cursor.clone(),
    )));

    {
        let (app, cursor, dot) = (Rc::clone(app), Rc::clone(&cursor), dot.clone());
        let document = app.document.clone();
        dom::listen(&document, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pointer = Point::new(event.client_x() as f64, event.client_y() as f64);
            let position = app.tween(|tweener| cursor.borrow_mut().on_pointer_move(pointer, tweener));
            let dot = dot.clone();
            app.schedule_keyed(DOT_KEY, move |dom| {
                dom.set_style(
                    &dot,
                    "transform",
                    &format!("translate({}px, {}px)", position.x, position.y),
                );
            });
        })?;
    }

    for target in app.query_all(HOVER_TARGETS)? {
        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let (app, cursor) = (Rc::clone(app), Rc::clone(&cursor));
            let (dot, follower) = (dot.clone(), follower.clone());
            dom::listen(&target, event, move |_| {
                let changed = cursor.borrow_mut().set_hover(hovered);
                if let Some(view) = changed {
                    write_hover(&app, &dot, &follower, view);
                }
            })?;
        }
    }
    Ok(())
}

fn write_hover(app: &App, dot: &Element, follower: &Element, view: CursorView) {
    let (dot, follower) = (dot.clone(), follower.clone());
    app.schedule_keyed(HOVER_KEY, move |dom| {
        dom.set_class(&dot, "cursor-active", view.dot_active);
        dom.set_class(&follower, "cursor-follower-active", view.follower_active);
    });
}
