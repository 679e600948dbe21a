use std::cell::RefCell;
use std::rc::Rc;

use glide_core::frame::FrameKey;
use glide_core::widgets::header::ScrollDirection;
use glide_core::widgets::HeaderState;
use glide_core::Result;

use crate::app::App;
use crate::dom;

const HEADER_KEY: FrameKey = FrameKey::channel("header");

pub fn init(app: &Rc<App>) -> Result<()> {
    let header = app.query(".header")?;
    let state = RefCell::new(HeaderState::new(app.config.header.clone()));

    let handle = Rc::clone(app);
    let window = app.window.clone();
    dom::listen(&window, "scroll", move |_| {
        let view = state.borrow_mut().on_scroll(dom::scroll_y(&handle.window));
        let header = header.clone();
        handle.schedule_keyed(HEADER_KEY, move |dom| {
            dom.set_class(&header, "scrolled", view.scrolled);
            for direction in [ScrollDirection::Down, ScrollDirection::Up] {
                if let Some(class) = direction.class() {
                    dom.set_class(&header, class, view.direction == direction);
                }
            }
        });
    })
}
