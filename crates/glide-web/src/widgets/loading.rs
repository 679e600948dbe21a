use std::cell::RefCell;
use std::rc::Rc;

use glide_core::widgets::{LoadingPhase, LoadingScreen};
use glide_core::Result;
use web_sys::Element;

use crate::app::App;
use crate::dom;

pub fn init(app: &Rc<App>) -> Result<()> {
    let element = app.query(".loading-screen")?;
    let mut screen = LoadingScreen::new(app.config.loading.clone());
    screen.on_load(dom::now_ms());
    schedule_next(app, Rc::new(RefCell::new(screen)), element);
    Ok(())
}

fn schedule_next(app: &Rc<App>, screen: Rc<RefCell<LoadingScreen>>, element: Element) {
    let due_in = screen.borrow().next_due_in(dom::now_ms());
    let Some(delay) = due_in else {
        return;
    };
    let handle = Rc::clone(app);
    app.set_timeout(delay, move || {
        let phase = screen.borrow_mut().tick(dom::now_ms());
        if let Some(phase) = phase {
            let target = element.clone();
            handle.schedule(move |dom| match phase {
                LoadingPhase::Loaded => dom.set_class(&target, "loaded", true),
                LoadingPhase::Removed => dom.remove(&target),
                LoadingPhase::Visible => {}
            });
        }
        schedule_next(&handle, screen, element);
    });
}
